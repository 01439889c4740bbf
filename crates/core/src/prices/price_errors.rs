use thiserror::Error;

use crate::registry::Denomination;

/// Errors raised while building or querying price curves.
#[derive(Error, Debug, PartialEq)]
pub enum PriceError {
    #[error("No price observations for {0}")]
    NoObservations(String),

    #[error("Price for {subject} at {timestamp} cannot be represented as a float")]
    NotRepresentable { subject: String, timestamp: i64 },

    #[error("No price curve registered for pool {0}")]
    UnknownPool(String),

    #[error("No reference price curve for denomination {0}")]
    MissingReference(Denomination),
}
