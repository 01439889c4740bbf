//! Reads the input feeds from disk.

use log::debug;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use super::{Feed, IngestionError, RawReferenceFeed, RawTransferBlock, RawVirtualPrice};

/// Locations of the three input feeds.
#[derive(Debug, Clone)]
pub struct InputFiles {
    pub transfers: PathBuf,
    pub virtual_prices: PathBuf,
    /// Only required when a registered pool is not USD-denominated.
    pub reference_prices: Option<PathBuf>,
}

/// All raw records of a run, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub transfers: Vec<RawTransferBlock>,
    pub virtual_prices: Vec<RawVirtualPrice>,
    pub reference_prices: Option<RawReferenceFeed>,
}

impl RawInputs {
    pub fn load(files: &InputFiles) -> Result<Self, IngestionError> {
        let transfers = load_feed(Feed::Transfers, &files.transfers)?;
        let virtual_prices = load_feed(Feed::VirtualPrices, &files.virtual_prices)?;
        let reference_prices = files
            .reference_prices
            .as_deref()
            .map(|path| load_feed(Feed::ReferencePrices, path))
            .transpose()?;

        Ok(Self {
            transfers,
            virtual_prices,
            reference_prices,
        })
    }

    pub fn from_json_strs(
        transfers: &str,
        virtual_prices: &str,
        reference_prices: Option<&str>,
    ) -> Result<Self, IngestionError> {
        Ok(Self {
            transfers: parse_feed(Feed::Transfers, transfers)?,
            virtual_prices: parse_feed(Feed::VirtualPrices, virtual_prices)?,
            reference_prices: reference_prices
                .map(|raw| parse_feed(Feed::ReferencePrices, raw))
                .transpose()?,
        })
    }
}

pub fn parse_feed<T: DeserializeOwned>(feed: Feed, raw: &str) -> Result<T, IngestionError> {
    serde_json::from_str(raw).map_err(|source| IngestionError::Parse { feed, source })
}

pub fn load_feed<T: DeserializeOwned>(feed: Feed, path: &Path) -> Result<T, IngestionError> {
    let raw = std::fs::read_to_string(path).map_err(|source| IngestionError::Io {
        feed,
        path: path.display().to_string(),
        source,
    })?;
    debug!("Read {} ({} bytes) from {}", feed, raw.len(), path.display());
    parse_feed(feed, &raw)
}
