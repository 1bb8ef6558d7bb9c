use super::account::{AccountId, Amount, Balance};
use super::transfer::Reservation;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// One participant in a transfer.
///
/// Every method is a single atomic step against the account; implementations
/// must not hold any lock beyond the call.
#[async_trait]
pub trait AccountPort: Send + Sync {
    fn id(&self) -> &AccountId;

    /// Point-in-time balance. May race with transfers in flight.
    async fn balance(&self) -> Balance;

    /// Prepare phase. `None` means insufficient funds and no change.
    async fn reserve_debit(&self, amount: Amount) -> Option<Reservation>;

    /// Commit phase. `false` obliges the caller to release the sender.
    async fn credit_commit(&self, amount: Amount) -> bool;

    /// Compensation: gives back exactly what `reservation` took.
    async fn release_debit(&self, reservation: Reservation) -> Result<()>;
}

pub type AccountHandle = Arc<dyn AccountPort>;
