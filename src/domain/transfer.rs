use super::account::{AccountId, Amount};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A validated request to move `amount` from one account to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Amount,
}

impl TransferRequest {
    /// Fails with `InvalidAmount` unless `amount` is strictly positive.
    pub fn new(from: AccountId, to: AccountId, amount: i64) -> Result<Self> {
        Ok(Self {
            from,
            to,
            amount: Amount::new(amount)?,
        })
    }
}

/// Funds taken from an account during the prepare phase.
///
/// Lives on the stack of a single transfer call. Releasing it consumes it, so
/// a compensation happens at most once and always for the reserved amount.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a reservation must be committed or released"]
pub struct Reservation {
    account: AccountId,
    amount: Amount,
}

impl Reservation {
    /// Only account adapters mint reservations, from inside their lock.
    pub(crate) fn new(account: AccountId, amount: Amount) -> Self {
        Self { account, amount }
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

/// Business result of a transfer that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferOutcome {
    /// Sender debited and receiver credited.
    Completed,
    /// Prepare refused; nothing changed.
    InsufficientFunds,
    /// Commit refused; the sender got its reservation back.
    RolledBack,
}

impl TransferOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferOutcome::Completed)
    }
}
