use crate::domain::account::AccountId;
use crate::domain::ledger::Ledger;
use crate::domain::transfer::{TransferOutcome, TransferRequest};
use crate::error::{LedgerError, Result};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Drives prepare, commit and compensation across two ledger accounts.
///
/// Only one account lock is held at any moment, so the protocol cannot
/// deadlock. The price is that a transfer is not isolated: between prepare and
/// commit the sender is already debited while the receiver is not yet
/// credited. Balances add up again once the call returns.
///
/// Cloning is cheap; clones share the same ledger.
#[derive(Clone)]
pub struct TransferCoordinator {
    ledger: Arc<Ledger>,
}

impl TransferCoordinator {
    /// Creates a new `TransferCoordinator` over a shared ledger.
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Moves `amount` minor units from `from` to `to`.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` when the transfer was
    /// refused for business reasons (insufficient funds or a failed commit that
    /// was rolled back). Caller mistakes surface as errors before any account
    /// is touched.
    pub async fn transfer(&self, from: &AccountId, to: &AccountId, amount: i64) -> Result<bool> {
        let request = TransferRequest::new(from.clone(), to.clone(), amount)?;
        Ok(self.execute(request).await?.is_completed())
    }

    /// Same as [`TransferCoordinator::transfer`], reporting which business
    /// outcome occurred.
    pub async fn execute(&self, request: TransferRequest) -> Result<TransferOutcome> {
        let sender = self.ledger.account(&request.from)?;
        let receiver = self.ledger.account(&request.to)?;
        if request.from == request.to {
            return Err(LedgerError::SameAccount(request.from));
        }

        let Some(reservation) = sender.reserve_debit(request.amount).await else {
            debug!(
                from = %request.from,
                to = %request.to,
                amount = request.amount.value(),
                "Insufficient funds"
            );
            return Ok(TransferOutcome::InsufficientFunds);
        };

        if receiver.credit_commit(reservation.amount()).await {
            debug!(
                from = %request.from,
                to = %request.to,
                amount = request.amount.value(),
                "Transfer committed"
            );
            return Ok(TransferOutcome::Completed);
        }

        warn!(
            from = %request.from,
            to = %request.to,
            amount = reservation.amount().value(),
            "Credit commit failed, releasing reservation"
        );
        let reserved = reservation.amount().value();
        if let Err(e) = sender.release_debit(reservation).await {
            error!(
                from = %request.from,
                amount = reserved,
                "Compensation failed, reservation not restored: {}", e
            );
            return Err(e);
        }
        Ok(TransferOutcome::RolledBack)
    }

    /// Point-in-time balance of one account.
    pub async fn get_balance(&self, id: &AccountId) -> Result<i64> {
        self.ledger.balance(id).await
    }
}
