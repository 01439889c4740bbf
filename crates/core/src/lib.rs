//! lpshare core - time-weighted liquidity share snapshots.
//!
//! Transfer events are replayed into a versioned per-account balance ledger,
//! which is then sampled on a uniform time grid to accumulate each account's
//! share of total pool value.

pub mod constants;
pub mod errors;
pub mod events;
pub mod integrals;
pub mod ledger;
pub mod prices;
pub mod registry;
pub mod snapshot;
pub mod utils;

pub use snapshot::{Snapshot, SnapshotConfig, SnapshotService, SnapshotServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
