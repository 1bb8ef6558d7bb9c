//! CSV boundary. Amounts are major units here and minor units everywhere else.

pub mod account_reader;
pub mod balance_writer;
pub mod transfer_reader;

use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Number of fractional digits in a major unit.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Converts a major-unit amount such as `12.34` into minor units (`1234`).
///
/// The sign is kept; positivity is checked by the domain.
pub fn to_minor_units(value: Decimal) -> Result<i64> {
    let normalized = value.normalize();
    if normalized.scale() > MINOR_UNIT_SCALE {
        return Err(LedgerError::InvalidMinorUnits(value.to_string()));
    }
    value
        .checked_mul(Decimal::from(10_i64.pow(MINOR_UNIT_SCALE)))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| LedgerError::InvalidMinorUnits(value.to_string()))
}

/// Converts minor units back into a normalized major-unit decimal.
pub fn from_minor_units(value: i64) -> Decimal {
    Decimal::new(value, MINOR_UNIT_SCALE).normalize()
}
