//! Per-step CSV report.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use lpshare_core::constants::TOKEN_UNIT;
use lpshare_core::integrals::AccumulationResult;
use lpshare_core::utils::time_utils::format_timestamp;

/// Writes `timestamp,date,total,<pool...>` rows, values in whole LP tokens.
pub fn write_step_report<W: Write>(writer: W, result: &AccumulationResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["timestamp".to_string(), "date".to_string(), "total".to_string()];
    header.extend(result.pools.iter().map(|pool| pool.display_name()));
    csv_writer.write_record(&header)?;

    for step in &result.steps {
        let mut row = vec![
            step.timestamp.to_string(),
            format_timestamp(step.timestamp),
            (step.total_value / TOKEN_UNIT).to_string(),
        ];
        row.extend(step.pool_values.iter().map(|value| (value / TOKEN_UNIT).to_string()));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_step_report_file(path: &Path, result: &AccumulationResult) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create step report {}", path.display()))?;
    write_step_report(file, result)
        .with_context(|| format!("Failed to write step report {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpshare_core::integrals::StepSummary;
    use lpshare_core::registry::{Address, Denomination, PoolDefinition};

    #[test]
    fn test_report_rows_are_scaled_to_tokens() {
        let token: Address = "0x00000000000000000000000000000000000000b1".parse().unwrap();
        let result = AccumulationResult {
            steps: vec![StepSummary {
                timestamp: 0,
                total_value: 2.5e18,
                pool_values: vec![2.5e18],
            }],
            steps_processed: 1,
            pools: vec![PoolDefinition {
                swap: token,
                token,
                denomination: Denomination::Usd,
                label: Some("compound".to_string()),
            }],
            ..Default::default()
        };

        let mut buffer = Vec::new();
        write_step_report(&mut buffer, &result).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "timestamp,date,total,compound\n0,1970-01-01 00:00:00,2.5,2.5\n"
        );
    }
}
