use super::to_minor_units;
use crate::domain::account::AccountId;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// One row of a transfer batch, amount already converted to minor units.
///
/// The amount is not validated here; the coordinator rejects non-positive
/// amounts with `InvalidAmount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRow {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
struct TransferRecord {
    from: AccountId,
    to: AccountId,
    amount: Decimal,
}

/// Reads transfers (`from,to,amount`) from a CSV source.
///
/// Rows are deserialized lazily, so large batches stream without being held
/// in memory by the reader.
pub struct TransferReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransferReader<R> {
    /// Creates a new `TransferReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes transfer rows.
    pub fn transfers(self) -> impl Iterator<Item = Result<TransferRow>> {
        self.reader.into_deserialize().map(|result| {
            let record: TransferRecord = result.map_err(LedgerError::from)?;
            Ok(TransferRow {
                from: record.from,
                to: record.to,
                amount: to_minor_units(record.amount)?,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "from, to, amount\nA, B, 200\nB, A, 0.5";
        let results: Vec<Result<TransferRow>> =
            TransferReader::new(data.as_bytes()).transfers().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.from.as_str(), "A");
        assert_eq!(first.to.as_str(), "B");
        assert_eq!(first.amount, 20000);
        assert_eq!(results[1].as_ref().unwrap().amount, 50);
    }

    #[test]
    fn test_reader_keeps_negative_amounts_for_the_coordinator() {
        let data = "from, to, amount\nA, B, -100";
        let row = TransferReader::new(data.as_bytes())
            .transfers()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(row.amount, -10000);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "from, to, amount\nA, B, abc\nA, B, 0.001";
        let results: Vec<Result<TransferRow>> =
            TransferReader::new(data.as_bytes()).transfers().collect();

        assert!(matches!(results[0], Err(LedgerError::CsvError(_))));
        assert!(matches!(results[1], Err(LedgerError::InvalidMinorUnits(_))));
    }
}
