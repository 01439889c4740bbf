//! Output snapshot models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};
use crate::registry::AccountId;

/// One account's result: the grid timestamp of its last integral term and its
/// average share of total value over the window.
///
/// Serialized as a two-element array `[last_timestamp, fraction]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotEntry {
    pub last_timestamp: i64,
    pub fraction: f64,
}

impl Serialize for SnapshotEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.last_timestamp, self.fraction).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SnapshotEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (last_timestamp, fraction) = <(i64, f64)>::deserialize(deserializer)?;
        Ok(Self {
            last_timestamp,
            fraction,
        })
    }
}

/// Final `address -> [last_timestamp, fraction]` mapping, ordered by address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub entries: BTreeMap<AccountId, SnapshotEntry>,
}

impl Snapshot {
    pub fn get(&self, account: &AccountId) -> Option<&SnapshotEntry> {
        self.entries.get(account)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fraction_sum(&self) -> f64 {
        self.entries
            .values()
            .fold(0.0, |acc, entry| acc + entry.fraction)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Output(e.to_string()))
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        fs::write(path, json)
            .map_err(|e| Error::Output(format!("{}: {}", path.display(), e)))
    }
}
