//! Snapshot module - final per-account fractions and the end-to-end service.

mod snapshot_exporter;
mod snapshot_model;
mod snapshot_service;

pub use snapshot_exporter::SnapshotExporter;
pub use snapshot_model::{Snapshot, SnapshotEntry};
pub use snapshot_service::{SnapshotConfig, SnapshotRun, SnapshotService, SnapshotServiceTrait};
