use log::{debug, info};
use rayon::prelude::*;
use std::collections::BTreeMap;

use super::{AccumulationResult, StepSummary, TimeGrid, UserIntegral};
use crate::constants::TOKEN_UNIT;
use crate::errors::Result;
use crate::ledger::BalanceLedger;
use crate::prices::PriceOracle;
use crate::registry::{AccountId, PoolDefinition};
use crate::utils::amounts::i256_to_f64;
use crate::utils::time_utils::format_timestamp;

/// Walks a time grid and sums each account's share of total pool value.
///
/// Every reduction runs sequentially in a fixed order: pools in the order
/// given to [`IntegralAccumulator::new`], accounts in the order passed to
/// [`IntegralAccumulator::run`]. Only per-account valuation is parallel, so the
/// result does not depend on the rayon thread count.
#[derive(Debug, Clone)]
pub struct IntegralAccumulator {
    pools: Vec<PoolDefinition>,
    track_history: bool,
}

impl IntegralAccumulator {
    pub fn new(pools: &[PoolDefinition]) -> Self {
        Self {
            pools: pools.to_vec(),
            track_history: false,
        }
    }

    pub fn with_history(mut self, track_history: bool) -> Self {
        self.track_history = track_history;
        self
    }

    pub fn run(
        &self,
        ledger: &BalanceLedger,
        oracle: &dyn PriceOracle,
        accounts: &[AccountId],
        grid: &TimeGrid,
    ) -> Result<AccumulationResult> {
        grid.validate()?;

        let mut integrals: BTreeMap<AccountId, UserIntegral> = BTreeMap::new();
        let mut steps = Vec::new();

        for timestamp in grid.points() {
            let summary = self.accumulate_step(ledger, oracle, accounts, timestamp, &mut integrals)?;
            debug!(
                "Step {}: total value {:.6} tokens",
                format_timestamp(timestamp),
                summary.total_value / TOKEN_UNIT
            );
            steps.push(summary);
        }

        let steps_processed = steps.len() as u64;
        info!(
            "Accumulated {} steps for {} accounts across {} pools",
            steps_processed,
            accounts.len(),
            self.pools.len()
        );

        Ok(AccumulationResult {
            integrals,
            steps,
            steps_processed,
            pools: self.pools.clone(),
        })
    }

    fn accumulate_step(
        &self,
        ledger: &BalanceLedger,
        oracle: &dyn PriceOracle,
        accounts: &[AccountId],
        timestamp: i64,
        integrals: &mut BTreeMap<AccountId, UserIntegral>,
    ) -> Result<StepSummary> {
        // --- 1. Multipliers, one per pool ---
        let multipliers = self
            .pools
            .iter()
            .map(|pool| oracle.multiplier(pool, timestamp))
            .collect::<std::result::Result<Vec<f64>, _>>()?;

        // --- 2. Per-account, per-pool values (parallel, order preserved) ---
        let values: Vec<Vec<f64>> = accounts
            .par_iter()
            .map(|account| {
                self.pools
                    .iter()
                    .zip(&multipliers)
                    .map(|(pool, multiplier)| {
                        let balance = ledger.balance_as_of(&pool.token, account, timestamp);
                        i256_to_f64(balance) * multiplier
                    })
                    .collect()
            })
            .collect();

        // --- 3. Totals: pool-major, account-minor ---
        let mut pool_values = vec![0.0; self.pools.len()];
        let mut total_value = 0.0;
        for (pool_index, pool_value) in pool_values.iter_mut().enumerate() {
            for account_values in &values {
                let value = account_values[pool_index];
                *pool_value += value;
                total_value += value;
            }
        }

        // --- 4. Shares into integrals ---
        for (account, account_values) in accounts.iter().zip(&values) {
            let account_value: f64 = account_values.iter().fold(0.0, |acc, value| acc + value);
            let share = if total_value != 0.0 {
                account_value / total_value
            } else {
                0.0
            };
            integrals
                .entry(*account)
                .or_default()
                .add(timestamp, share, self.track_history);
        }

        Ok(StepSummary {
            timestamp,
            total_value,
            pool_values,
        })
    }
}
