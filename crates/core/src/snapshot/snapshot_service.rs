use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use super::{Snapshot, SnapshotExporter};
use crate::constants::{DEFAULT_STEP_SECONDS, DEFAULT_WINDOW_START};
use crate::errors::Result;
use crate::events::{EventNormalizer, InputFiles, RawInputs};
use crate::integrals::{AccumulationResult, IntegralAccumulator, TimeGrid};
use crate::ledger::{BalanceLedger, IngestionReport};
use crate::prices::SplinePriceOracle;
use crate::registry::{AccountId, Denomination, PoolRegistry};
use crate::utils::time_utils::format_timestamp;

/// Window and grid parameters of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotConfig {
    pub window_start: i64,
    /// Exclusive end; the latest transfer timestamp when unset.
    pub window_end: Option<i64>,
    pub step_seconds: i64,
    pub track_history: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            window_start: DEFAULT_WINDOW_START,
            window_end: None,
            step_seconds: DEFAULT_STEP_SECONDS,
            track_history: false,
        }
    }
}

/// Everything a run produced, kept in memory for callers that want more than
/// the output file.
#[derive(Debug, Clone)]
pub struct SnapshotRun {
    pub snapshot: Snapshot,
    pub accumulation: AccumulationResult,
    pub ingestion: Vec<IngestionReport>,
    pub accounts: Vec<AccountId>,
    pub grid: TimeGrid,
}

pub trait SnapshotServiceTrait: Send + Sync {
    /// Runs normalize, ingest, accumulate and export over already-parsed feeds.
    fn run(&self, inputs: &RawInputs) -> Result<SnapshotRun>;

    /// Reads the feeds from disk, then runs.
    fn run_files(&self, files: &InputFiles) -> Result<SnapshotRun> {
        let inputs = RawInputs::load(files)?;
        self.run(&inputs)
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotService {
    registry: PoolRegistry,
    config: SnapshotConfig,
}

impl SnapshotService {
    pub fn new(registry: PoolRegistry, config: SnapshotConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }
}

impl SnapshotServiceTrait for SnapshotService {
    fn run(&self, inputs: &RawInputs) -> Result<SnapshotRun> {
        let started = Instant::now();
        let normalizer = EventNormalizer::new(&self.registry);

        // --- 1. Normalize feeds ---
        let transfers = normalizer.normalize_transfers(&inputs.transfers)?;
        let virtual_prices = normalizer.normalize_virtual_prices(&inputs.virtual_prices)?;
        let mut reference_prices = BTreeMap::new();
        if let Some(feed) = &inputs.reference_prices {
            reference_prices.insert(Denomination::Btc, normalizer.normalize_reference_prices(feed)?);
        }

        // --- 2. Replay transfers into the ledger ---
        let mut ledger = BalanceLedger::from_registry(&self.registry);
        let mut ingestion = Vec::with_capacity(self.registry.pools().len());
        for pool in self.registry.pools() {
            let report = ledger.ingest(pool.token, transfers.events(&pool.token))?;
            if report.has_anomalies() {
                warn!("Data quality issues in {} ({})", pool.display_name(), report);
            }
            ingestion.push(report);
        }
        info!(
            "Ledger built for {} pools in {:?}",
            ledger.pool_count(),
            started.elapsed()
        );

        // --- 3. Price curves ---
        let oracle = SplinePriceOracle::build(&self.registry, &virtual_prices, &reference_prices)?;

        // --- 4. Accumulate over the grid ---
        let window_end = self
            .config
            .window_end
            .or(transfers.max_timestamp)
            .unwrap_or(self.config.window_start);
        let grid = TimeGrid::new(self.config.window_start, window_end, self.config.step_seconds)?;
        info!(
            "Accumulating from {} to {} every {}s",
            format_timestamp(grid.start),
            format_timestamp(grid.end),
            grid.step_seconds
        );
        let accumulation_started = Instant::now();
        let accumulation = IntegralAccumulator::new(self.registry.pools())
            .with_history(self.config.track_history)
            .run(&ledger, &oracle, &transfers.accounts, &grid)?;
        info!("Accumulation finished in {:?}", accumulation_started.elapsed());

        // --- 5. Export ---
        let snapshot = SnapshotExporter::export(&accumulation);
        info!("Snapshot run completed in {:?}", started.elapsed());

        Ok(SnapshotRun {
            snapshot,
            accumulation,
            ingestion,
            accounts: transfers.accounts,
            grid,
        })
    }
}
