//! Core error types for lpshare.
//!
//! Each domain module owns a narrow error enum; this module folds them into a
//! single root [`Error`] so the service and the CLI can propagate with `?`.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::events::IngestionError;
use crate::ledger::LedgerError;
use crate::prices::PriceError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for a snapshot run.
///
/// Ingestion, ledger and configuration failures are fatal for the whole run:
/// a partially replayed ledger cannot produce a usable snapshot.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ingestion failed: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Price lookup failed: {0}")]
    Price(#[from] PriceError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(String),
}

/// Errors raised while building the pool registry or the run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid address '{value}': {reason}")]
    InvalidAddress { value: String, reason: String },

    #[error("Pool token {0} is registered more than once")]
    DuplicatePool(String),

    #[error("Swap contract {0} is registered more than once")]
    DuplicateSwap(String),

    #[error("Unknown denomination '{0}'")]
    UnknownDenomination(String),

    #[error("Failed to read registry file {path}: {reason}")]
    RegistryIO { path: String, reason: String },

    #[error("Failed to parse registry: {0}")]
    RegistryParse(#[from] serde_json::Error),

    #[error("Grid step must be positive, got {0} seconds")]
    InvalidStep(i64),

    #[error("Failed to parse date/time '{value}': {source}")]
    DateTimeParse {
        value: String,
        source: ChronoParseError,
    },
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
