//! Transfer and price record models, raw and normalized.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::registry::{AccountId, PoolId};

// =============================================================================
// Raw feed records
// =============================================================================

/// One block of the transfer feed. Every field is optional at this level so
/// the normalizer can name exactly which one is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTransferBlock {
    pub timestamp: Option<Value>,
    pub block: Option<Value>,
    pub transfers: Option<Vec<RawTransfer>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransfer {
    /// LP token contract emitting the transfer
    pub address: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<Value>,
    pub log_index: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVirtualPrice {
    /// Swap contract the price was read from
    pub address: Option<String>,
    pub block: Option<Value>,
    pub timestamp: Option<Value>,
    /// Fixed-point integer scaled by 1e18
    pub virtual_price: Option<Value>,
}

/// Reference price feed, either as returned by the market-chart endpoint
/// (`{"prices": [[ms, price], ...]}`) or as a bare list of pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawReferenceFeed {
    Wrapped { prices: Vec<(Value, Value)> },
    Bare(Vec<(Value, Value)>),
}

impl RawReferenceFeed {
    pub fn points(&self) -> &[(Value, Value)] {
        match self {
            RawReferenceFeed::Wrapped { prices } => prices,
            RawReferenceFeed::Bare(prices) => prices,
        }
    }
}

// =============================================================================
// Normalized records
// =============================================================================

/// One token movement inside a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub pool: PoolId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: U256,
    pub timestamp: i64,
    pub block: u64,
    pub log_index: u32,
}

impl Event {
    /// Causal replay position.
    pub fn position(&self) -> (u64, u32) {
        (self.block, self.log_index)
    }
}

/// A single price sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub timestamp: i64,
    pub block: Option<u64>,
    pub price: Decimal,
}

/// Output of the transfer normalization pass.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTransfers {
    /// Events per pool, sorted by `(block, log_index)`.
    pub events_by_pool: BTreeMap<PoolId, Vec<Event>>,
    /// Every non-burner address seen on either side of any transfer, sorted.
    pub accounts: Vec<AccountId>,
    /// Latest event timestamp across all pools.
    pub max_timestamp: Option<i64>,
}

impl NormalizedTransfers {
    pub fn events(&self, pool: &PoolId) -> &[Event] {
        self.events_by_pool
            .get(pool)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn event_count(&self) -> usize {
        self.events_by_pool.values().map(Vec::len).sum()
    }
}
