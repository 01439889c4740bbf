//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

use lpshare_core::constants::{DEFAULT_STEP_SECONDS, DEFAULT_WINDOW_START};
use lpshare_core::events::InputFiles;
use lpshare_core::utils::time_utils::parse_window_boundary;
use lpshare_core::SnapshotConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "lpshare")]
#[command(version)]
#[command(about = "Time-weighted LP share snapshot from transfer and price feeds", long_about = None)]
pub struct Cli {
    /// Transfer event feed (JSON)
    #[arg(long, env = "LPSHARE_TRANSFERS", value_name = "FILE")]
    pub transfers: PathBuf,

    /// Virtual price feed (JSON)
    #[arg(long, env = "LPSHARE_VIRTUAL_PRICES", value_name = "FILE")]
    pub virtual_prices: PathBuf,

    /// BTC/USD price feed, required when a BTC pool is registered
    #[arg(long, env = "LPSHARE_REFERENCE_PRICES", value_name = "FILE")]
    pub reference_prices: Option<PathBuf>,

    /// Pool registry file; the built-in Curve mainnet tables when omitted
    #[arg(long, env = "LPSHARE_REGISTRY", value_name = "FILE")]
    pub registry: Option<PathBuf>,

    #[arg(long, env = "LPSHARE_OUTPUT", value_name = "FILE", default_value = "output.json")]
    pub output: PathBuf,

    /// Window start: YYYY-MM-DD, RFC 3339 or unix seconds
    #[arg(long, env = "LPSHARE_START", value_parser = parse_boundary)]
    pub start: Option<i64>,

    /// Window end (exclusive); defaults to the latest transfer
    #[arg(long, env = "LPSHARE_END", value_parser = parse_boundary)]
    pub end: Option<i64>,

    #[arg(long, env = "LPSHARE_STEP_SECONDS", default_value_t = DEFAULT_STEP_SECONDS)]
    pub step_seconds: i64,

    /// Write per-step totals as CSV
    #[arg(long, env = "LPSHARE_STEP_REPORT", value_name = "FILE")]
    pub step_report: Option<PathBuf>,

    /// Keep each account's integral after every step
    #[arg(long, env = "LPSHARE_HISTORY")]
    pub history: bool,

    /// Worker threads for per-step valuation
    #[arg(long, env = "LPSHARE_THREADS")]
    pub threads: Option<usize>,
}

fn parse_boundary(value: &str) -> Result<i64, String> {
    parse_window_boundary(value).map_err(|e| e.to_string())
}

impl Cli {
    /// Loads `.env` if present, then parses arguments with env fallbacks.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn input_files(&self) -> InputFiles {
        InputFiles {
            transfers: self.transfers.clone(),
            virtual_prices: self.virtual_prices.clone(),
            reference_prices: self.reference_prices.clone(),
        }
    }

    pub fn snapshot_config(&self) -> SnapshotConfig {
        SnapshotConfig {
            window_start: self.start.unwrap_or(DEFAULT_WINDOW_START),
            window_end: self.end,
            step_seconds: self.step_seconds,
            track_history: self.history,
        }
    }
}
