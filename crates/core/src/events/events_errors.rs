//! Ingestion error types.

use std::fmt;
use thiserror::Error;

/// Input feed a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Transfers,
    VirtualPrices,
    ReferencePrices,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Feed::Transfers => "transfer feed",
            Feed::VirtualPrices => "virtual-price feed",
            Feed::ReferencePrices => "reference-price feed",
        };
        f.write_str(name)
    }
}

/// Position of a raw record inside its feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLocation {
    pub feed: Feed,
    pub record: usize,
    /// Index inside the block's `transfers` list (transfer feed only).
    pub transfer: Option<usize>,
    /// Pool address as written in the record, when it could be read.
    pub pool: Option<String>,
}

impl RecordLocation {
    pub fn new(feed: Feed, record: usize) -> Self {
        Self {
            feed,
            record,
            transfer: None,
            pool: None,
        }
    }

    pub fn with_transfer(mut self, transfer: usize) -> Self {
        self.transfer = Some(transfer);
        self
    }

    pub fn with_pool(mut self, pool: Option<&str>) -> Self {
        self.pool = pool.map(str::to_string);
        self
    }
}

impl fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} record #{}", self.feed, self.record)?;
        if let Some(transfer) = self.transfer {
            write!(f, ", transfer #{}", transfer)?;
        }
        if let Some(pool) = &self.pool {
            write!(f, ", pool {}", pool)?;
        }
        Ok(())
    }
}

/// Fatal errors raised while reading or normalizing input feeds.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read {feed} from {path}: {source}")]
    Io {
        feed: Feed,
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed {feed}: {source}")]
    Parse {
        feed: Feed,
        source: serde_json::Error,
    },

    #[error("{location}: required field '{field}' is missing")]
    MissingField {
        location: RecordLocation,
        field: &'static str,
    },

    #[error("{location}: field '{field}' has invalid value '{value}': {reason}")]
    InvalidField {
        location: RecordLocation,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{location}: price source {address} is not a registered swap contract")]
    UnknownPriceSource {
        location: RecordLocation,
        address: String,
    },
}

impl IngestionError {
    pub fn location(&self) -> Option<&RecordLocation> {
        match self {
            IngestionError::MissingField { location, .. }
            | IngestionError::InvalidField { location, .. }
            | IngestionError::UnknownPriceSource { location, .. } => Some(location),
            IngestionError::Io { .. } | IngestionError::Parse { .. } => None,
        }
    }
}
