use super::from_minor_units;
use crate::domain::account::AccountId;
use crate::domain::ledger::AccountSnapshot;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct BalanceRecord<'a> {
    account: &'a AccountId,
    balance: Decimal,
}

/// Writes final balances as `account,balance` rows in major units.
pub struct BalanceWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BalanceWriter<W> {
    /// Creates a new `BalanceWriter` over any `Write` sink (e.g., Stdout).
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes one row per snapshot entry, header first, then flushes.
    pub fn write_balances(&mut self, snapshot: &[AccountSnapshot]) -> Result<()> {
        for entry in snapshot {
            self.writer.serialize(BalanceRecord {
                account: &entry.account,
                balance: from_minor_units(entry.balance),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes final balances as a JSON array of `{account, balance}` objects.
///
/// Balances are major-unit strings so no precision is lost on the way out.
pub fn write_balances_json<W: Write>(sink: W, snapshot: &[AccountSnapshot]) -> Result<()> {
    let records: Vec<BalanceRecord<'_>> = snapshot
        .iter()
        .map(|entry| BalanceRecord {
            account: &entry.account,
            balance: from_minor_units(entry.balance),
        })
        .collect();
    serde_json::to_writer_pretty(sink, &records)?;
    Ok(())
}
