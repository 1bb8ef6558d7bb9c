use super::account::AccountId;
use super::ports::AccountHandle;
use crate::error::{LedgerError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Balance of one account at the moment it was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    pub account: AccountId,
    pub balance: i64,
}

/// The fixed set of accounts a coordinator operates over.
///
/// The id-to-account map is never mutated after construction, so lookups need
/// no synchronization; each account guards its own balance.
pub struct Ledger {
    accounts: HashMap<AccountId, AccountHandle>,
}

impl Ledger {
    /// Builds a ledger over arbitrary account implementations.
    ///
    /// Rejects duplicate ids and accounts whose balances add up to more than
    /// an `i64` can hold. Balances are read once, so the accounts must not be
    /// in use elsewhere while the ledger is built.
    pub async fn from_accounts(handles: Vec<AccountHandle>) -> Result<Self> {
        let mut supply: i64 = 0;
        for handle in &handles {
            supply = supply
                .checked_add(handle.balance().await.value())
                .ok_or(LedgerError::SupplyOverflow)?;
        }
        Self::from_handles(handles)
    }

    /// Indexes `handles` by id without looking at their balances.
    pub(crate) fn from_handles(handles: Vec<AccountHandle>) -> Result<Self> {
        let mut accounts = HashMap::with_capacity(handles.len());
        for handle in handles {
            match accounts.entry(handle.id().clone()) {
                Entry::Occupied(entry) => {
                    return Err(LedgerError::DuplicateAccount(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(handle);
                }
            }
        }
        Ok(Self { accounts })
    }

    /// Resolves `id`, failing with `AccountNotFound` if it is not in the ledger.
    pub fn account(&self, id: &AccountId) -> Result<&AccountHandle> {
        self.accounts
            .get(id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.clone()))
    }

    /// Returns `true` if `id` belongs to this ledger.
    pub fn contains(&self, id: &AccountId) -> bool {
        self.accounts.contains_key(id)
    }

    /// Point-in-time balance of `id`; may race with transfers in flight.
    pub async fn balance(&self, id: &AccountId) -> Result<i64> {
        Ok(self.account(id)?.balance().await.value())
    }

    /// Sorted account ids.
    pub fn ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self.accounts.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances. Only meaningful when no transfer is in flight.
    pub async fn total_balance(&self) -> i128 {
        let mut total: i128 = 0;
        for handle in self.accounts.values() {
            total += i128::from(handle.balance().await.value());
        }
        total
    }

    /// Balances of every account, sorted by id.
    ///
    /// Accounts are read one at a time; quiesce transfers first for a
    /// consistent picture.
    pub async fn snapshot(&self) -> Vec<AccountSnapshot> {
        let mut snapshot = Vec::with_capacity(self.accounts.len());
        for id in self.ids() {
            if let Some(handle) = self.accounts.get(&id) {
                snapshot.push(AccountSnapshot {
                    balance: handle.balance().await.value(),
                    account: id,
                });
            }
        }
        snapshot
    }
}
