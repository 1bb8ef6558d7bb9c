//! Domain layer: accounts, the transfer context, and the ledger.

pub mod account;
pub mod ledger;
pub mod ports;
pub mod transfer;
