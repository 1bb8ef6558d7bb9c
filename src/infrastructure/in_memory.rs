use crate::domain::account::{Account, AccountId, Amount, Balance};
use crate::domain::ledger::Ledger;
use crate::domain::ports::{AccountHandle, AccountPort};
use crate::domain::transfer::Reservation;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// An [`Account`] guarded by its own exclusive lock.
///
/// The lock is taken once per primitive and dropped before returning, so no
/// caller ever holds two account locks at the same time.
#[derive(Debug)]
pub struct SharedAccount {
    id: AccountId,
    state: Mutex<Account>,
}

impl SharedAccount {
    /// Creates a new account holding `balance` under its own lock.
    pub fn new(id: AccountId, balance: Balance) -> Self {
        Self {
            state: Mutex::new(Account::new(id.clone(), balance)),
            id,
        }
    }
}

#[async_trait]
impl AccountPort for SharedAccount {
    fn id(&self) -> &AccountId {
        &self.id
    }

    async fn balance(&self) -> Balance {
        self.state.lock().await.balance()
    }

    async fn reserve_debit(&self, amount: Amount) -> Option<Reservation> {
        let mut account = self.state.lock().await;
        account
            .reserve_debit(amount)
            .then(|| Reservation::new(self.id.clone(), amount))
    }

    async fn credit_commit(&self, amount: Amount) -> bool {
        self.state.lock().await.credit_commit(amount)
    }

    async fn release_debit(&self, reservation: Reservation) -> Result<()> {
        if reservation.account() != &self.id {
            return Err(LedgerError::ReservationMismatch {
                reserved_from: reservation.account().clone(),
                released_to: self.id.clone(),
            });
        }
        self.state
            .lock()
            .await
            .release_debit(reservation.amount())
    }
}

impl Ledger {
    /// Builds a ledger of [`SharedAccount`]s from `(id, initial balance)` seeds.
    ///
    /// Rejects duplicate ids, negative balances, and seeds whose sum does not
    /// fit in an `i64`. The last check means no balance can ever overflow.
    pub fn new<I>(seeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (AccountId, i64)>,
    {
        let mut supply: i64 = 0;
        let mut handles: Vec<AccountHandle> = Vec::new();
        for (id, initial) in seeds {
            let balance = Balance::new(initial)?;
            supply = supply
                .checked_add(balance.value())
                .ok_or(LedgerError::SupplyOverflow)?;
            handles.push(Arc::new(SharedAccount::new(id, balance)));
        }
        Self::from_handles(handles)
    }
}
