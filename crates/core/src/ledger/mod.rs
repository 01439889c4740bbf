//! Ledger module - versioned per-account balance history built from transfers.

mod balance_ledger;
mod ledger_errors;
mod ledger_model;
mod version_key;

pub use balance_ledger::BalanceLedger;
pub use ledger_errors::LedgerError;
pub use ledger_model::{BalanceSeries, IngestionReport};
pub use version_key::VersionKey;
