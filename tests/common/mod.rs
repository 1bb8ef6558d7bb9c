#![allow(dead_code)]

use async_trait::async_trait;
use funds_transfer::application::coordinator::TransferCoordinator;
use funds_transfer::domain::account::{AccountId, Amount, Balance};
use funds_transfer::domain::ledger::Ledger;
use funds_transfer::domain::ports::AccountPort;
use funds_transfer::domain::transfer::Reservation;
use funds_transfer::error::Result;
use funds_transfer::infrastructure::in_memory::SharedAccount;
use std::sync::Arc;

pub fn coordinator(seeds: &[(&str, i64)]) -> TransferCoordinator {
    let ledger = Ledger::new(seeds.iter().map(|(id, b)| (AccountId::from(*id), *b)))
        .expect("Failed to build ledger");
    TransferCoordinator::new(Arc::new(ledger))
}

pub fn shared(id: &str, balance: i64) -> SharedAccount {
    SharedAccount::new(id.into(), Balance::new(balance).expect("Negative seed"))
}

/// Account that accepts debits but refuses every credit.
pub struct FailingCreditAccount {
    inner: SharedAccount,
}

impl FailingCreditAccount {
    pub fn new(id: &str, balance: i64) -> Self {
        Self {
            inner: shared(id, balance),
        }
    }
}

#[async_trait]
impl AccountPort for FailingCreditAccount {
    fn id(&self) -> &AccountId {
        self.inner.id()
    }

    async fn balance(&self) -> Balance {
        self.inner.balance().await
    }

    async fn reserve_debit(&self, amount: Amount) -> Option<Reservation> {
        self.inner.reserve_debit(amount).await
    }

    async fn credit_commit(&self, _amount: Amount) -> bool {
        // Give concurrent prepares on the sender a chance to interleave.
        tokio::task::yield_now().await;
        false
    }

    async fn release_debit(&self, reservation: Reservation) -> Result<()> {
        self.inner.release_debit(reservation).await
    }
}
