use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Cli;
use crate::report::write_step_report_file;
use lpshare_core::registry::PoolRegistry;
use lpshare_core::snapshot::SnapshotRun;
use lpshare_core::{SnapshotService, SnapshotServiceTrait};

pub fn init_tracing() {
    let log_format = std::env::var("LPSHARE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn load_registry(cli: &Cli) -> Result<PoolRegistry> {
    let registry = match &cli.registry {
        Some(path) => PoolRegistry::from_file(path)
            .with_context(|| format!("Failed to load registry {}", path.display()))?,
        None => PoolRegistry::curve_mainnet().context("Built-in registry is invalid")?,
    };
    tracing::info!(
        "Registry: {} pools, {} burners",
        registry.pools().len(),
        registry.burners().len()
    );
    Ok(registry)
}

/// Runs one snapshot and writes the output file and optional step report.
pub fn run(cli: &Cli) -> Result<SnapshotRun> {
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let service = SnapshotService::new(load_registry(cli)?, cli.snapshot_config());
    let run = service
        .run_files(&cli.input_files())
        .context("Snapshot run failed")?;

    run.snapshot
        .write_json(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    tracing::info!(
        "Wrote {} accounts to {}",
        run.snapshot.len(),
        cli.output.display()
    );

    if let Some(path) = &cli.step_report {
        write_step_report_file(path, &run.accumulation)?;
        tracing::info!("Wrote {} steps to {}", run.accumulation.steps.len(), path.display());
    }

    Ok(run)
}
