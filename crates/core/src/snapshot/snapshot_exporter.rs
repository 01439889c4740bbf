use log::info;

use super::{Snapshot, SnapshotEntry};
use crate::integrals::AccumulationResult;

/// Turns accumulated integrals into per-account average shares.
pub struct SnapshotExporter;

impl SnapshotExporter {
    pub fn export(result: &AccumulationResult) -> Snapshot {
        if result.steps_processed == 0 {
            return Snapshot::default();
        }
        let steps = result.steps_processed as f64;

        let entries = result
            .integrals
            .iter()
            .map(|(account, integral)| {
                (
                    *account,
                    SnapshotEntry {
                        last_timestamp: integral.last_timestamp,
                        fraction: integral.value / steps,
                    },
                )
            })
            .collect();

        let snapshot = Snapshot { entries };
        info!(
            "Exported {} accounts over {} steps (fraction sum {:.9})",
            snapshot.len(),
            result.steps_processed,
            snapshot.fraction_sum()
        );
        snapshot
    }
}
