use crate::domain::account::AccountId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Amount must be positive")]
    InvalidAmount,
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),
    #[error("Duplicate account: {0}")]
    DuplicateAccount(AccountId),
    #[error("Balance must not be negative, got {0}")]
    NegativeBalance(i64),
    #[error("Total supply of the ledger does not fit in a 64-bit balance")]
    SupplyOverflow,
    #[error("Reservation taken from account {reserved_from} released to account {released_to}")]
    ReservationMismatch {
        reserved_from: AccountId,
        released_to: AccountId,
    },
    #[error("Balance overflow on account {0}")]
    BalanceOverflow(AccountId),
    #[error("Amount {0} has more than two fractional digits or is out of range")]
    InvalidMinorUnits(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LedgerError {
    /// Caller mistakes detected before any account is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount
                | LedgerError::AccountNotFound(_)
                | LedgerError::SameAccount(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
