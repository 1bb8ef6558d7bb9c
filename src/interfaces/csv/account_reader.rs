use super::to_minor_units;
use crate::domain::account::AccountId;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct AccountRecord {
    account: AccountId,
    balance: Decimal,
}

/// Reads ledger seeds (`account,balance`) from a CSV source.
///
/// Balances are major units and come out as `(id, minor units)` pairs ready
/// for [`Ledger::new`](crate::domain::ledger::Ledger::new).
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    /// Creates a new `AccountReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads seeds, converting balances to
    /// minor units.
    pub fn seeds(self) -> impl Iterator<Item = Result<(AccountId, i64)>> {
        self.reader.into_deserialize().map(|result| {
            let record: AccountRecord = result.map_err(LedgerError::from)?;
            Ok((record.account, to_minor_units(record.balance)?))
        })
    }
}
