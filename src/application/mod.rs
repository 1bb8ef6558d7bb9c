//! Application layer orchestrating transfers over a [`Ledger`](crate::domain::ledger::Ledger).
//!
//! `TransferCoordinator` is the entry point. It is cheap to clone and safe to
//! share across tokio tasks; all synchronization happens inside the accounts.

pub mod coordinator;
