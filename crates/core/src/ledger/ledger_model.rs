//! Ledger domain models.

use alloy_primitives::I256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::VersionKey;
use crate::registry::PoolId;

/// Balance history of one account in one pool.
///
/// `running` is the value of the most recently inserted entry. It is kept
/// separately from `entries` so the replay never depends on key order to find
/// the previous balance.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSeries {
    entries: BTreeMap<VersionKey, I256>,
    running: I256,
}

impl Default for BalanceSeries {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            running: I256::ZERO,
        }
    }
}

impl BalanceSeries {
    /// Records the balance after the event at `key` and returns it.
    pub(crate) fn record(&mut self, key: VersionKey, balance: I256) -> I256 {
        self.entries.insert(key, balance);
        self.running = balance;
        balance
    }

    /// Balance immediately before the next event to be replayed.
    pub fn running_balance(&self) -> I256 {
        self.running
    }

    /// Balance after the latest event with timestamp `<= timestamp`, or zero.
    pub fn balance_as_of(&self, timestamp: i64) -> I256 {
        self.entries
            .range(VersionKey::floor(timestamp)..)
            .next()
            .map(|(_, balance)| *balance)
            .unwrap_or(I256::ZERO)
    }

    /// Entries in chronological order.
    pub fn iter_chronological(&self) -> impl Iterator<Item = (&VersionKey, &I256)> {
        self.entries.iter().rev()
    }

    pub fn first_timestamp(&self) -> Option<i64> {
        self.entries.keys().next_back().map(VersionKey::timestamp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Summary of one pool's replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionReport {
    pub pool: PoolId,
    pub events_applied: usize,
    pub duplicates_skipped: usize,
    /// Events where both sides are burners; no balance changes.
    pub burner_only_events: usize,
    /// Debits that left an account below zero.
    pub negative_balances: usize,
    pub accounts_touched: usize,
}

impl IngestionReport {
    pub fn new(pool: PoolId) -> Self {
        Self {
            pool,
            ..Default::default()
        }
    }

    pub fn has_anomalies(&self) -> bool {
        self.duplicates_skipped > 0 || self.negative_balances > 0
    }
}

impl fmt::Display for IngestionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pool {}: {} events, {} accounts, {} duplicates skipped, {} negative balances",
            self.pool,
            self.events_applied,
            self.accounts_touched,
            self.duplicates_skipped,
            self.negative_balances
        )
    }
}
