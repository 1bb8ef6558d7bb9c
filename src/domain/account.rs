use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an account, unique within a [`Ledger`](super::ledger::Ledger).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new `AccountId` from anything convertible into a `String`.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A strictly positive amount of minor currency units (e.g. cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64")]
pub struct Amount(i64);

impl Amount {
    /// Creates a new `Amount`, failing with `InvalidAmount` unless `value > 0`.
    pub fn new(value: i64) -> Result<Self> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(LedgerError::InvalidAmount)
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = LedgerError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A non-negative account balance in minor currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64")]
pub struct Balance(i64);

impl Balance {
    pub const ZERO: Self = Self(0);

    /// Creates a new `Balance`, failing with `NegativeBalance` if `value < 0`.
    pub fn new(value: i64) -> Result<Self> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(LedgerError::NegativeBalance(value))
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    fn checked_add(self, amount: Amount) -> Option<Self> {
        self.0.checked_add(amount.0).map(Self)
    }

    fn checked_sub(self, amount: Amount) -> Option<Self> {
        self.0.checked_sub(amount.0).filter(|v| *v >= 0).map(Self)
    }
}

impl TryFrom<i64> for Balance {
    type Error = LedgerError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

/// The state of one ledger account.
///
/// This type holds no lock of its own; the infrastructure layer wraps it in one
/// and calls exactly one primitive per lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    balance: Balance,
}

impl Account {
    /// Creates a new account with its initial balance.
    pub fn new(id: AccountId, balance: Balance) -> Self {
        Self { id, balance }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Debits `amount` if the balance covers it.
    ///
    /// Returns `false` and leaves the balance untouched otherwise.
    pub fn reserve_debit(&mut self, amount: Amount) -> bool {
        match self.balance.checked_sub(amount) {
            Some(balance) => {
                self.balance = balance;
                true
            }
            None => false,
        }
    }

    /// Credits `amount`. Fails only if the balance would overflow.
    pub fn credit_commit(&mut self, amount: Amount) -> bool {
        match self.balance.checked_add(amount) {
            Some(balance) => {
                self.balance = balance;
                true
            }
            None => false,
        }
    }

    /// Restores exactly `amount` previously taken by [`Account::reserve_debit`].
    pub fn release_debit(&mut self, amount: Amount) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(self.id.clone()))?;
        Ok(())
    }
}
