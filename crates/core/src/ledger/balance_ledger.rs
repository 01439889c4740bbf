use alloy_primitives::I256;
use log::{debug, warn};
use std::collections::HashMap;

use super::{BalanceSeries, IngestionReport, LedgerError, VersionKey};
use crate::events::Event;
use crate::registry::{AccountId, BurnerSet, PoolId, PoolRegistry};

type PoolBalances = HashMap<AccountId, BalanceSeries>;

/// Point-in-time balances of every account in every ingested pool.
///
/// Built by replaying each pool's transfers exactly once, then only read.
/// Queries against a pool or account that was never seen return zero.
#[derive(Debug, Clone, Default)]
pub struct BalanceLedger {
    burners: BurnerSet,
    pools: HashMap<PoolId, PoolBalances>,
}

impl BalanceLedger {
    pub fn new(burners: BurnerSet) -> Self {
        Self {
            burners,
            pools: HashMap::new(),
        }
    }

    pub fn from_registry(registry: &PoolRegistry) -> Self {
        Self::new(registry.burners().clone())
    }

    /// Replays one pool's transfers, which must be sorted by `(block, log_index)`.
    ///
    /// Each non-burner side gets a new entry holding its balance after the
    /// event. The pool is only added to the ledger if the whole replay succeeds.
    pub fn ingest(&mut self, pool: PoolId, events: &[Event]) -> Result<IngestionReport, LedgerError> {
        if self.pools.contains_key(&pool) {
            return Err(LedgerError::PoolAlreadyIngested(pool.to_string()));
        }

        let mut balances = PoolBalances::new();
        let mut report = IngestionReport::new(pool);
        let mut previous: Option<(u64, u32)> = None;

        for event in events {
            if event.pool != pool {
                return Err(LedgerError::ForeignEvent {
                    pool: pool.to_string(),
                    event_pool: event.pool.to_string(),
                    block: event.block,
                    log_index: event.log_index,
                });
            }

            let position = event.position();
            if let Some(prev) = previous {
                if position < prev {
                    return Err(LedgerError::OutOfOrder {
                        pool: pool.to_string(),
                        block: event.block,
                        log_index: event.log_index,
                        previous_block: prev.0,
                        previous_log_index: prev.1,
                    });
                }
                if position == prev {
                    warn!(
                        "Skipping duplicate transfer record in pool {} at ({}, {})",
                        pool, event.block, event.log_index
                    );
                    report.duplicates_skipped += 1;
                    continue;
                }
            }
            previous = Some(position);

            self.apply_event(&mut balances, event, &mut report)?;
            report.events_applied += 1;
        }

        report.accounts_touched = balances.len();
        debug!("Ingested {}", report);
        self.pools.insert(pool, balances);
        Ok(report)
    }

    fn apply_event(
        &self,
        balances: &mut PoolBalances,
        event: &Event,
        report: &mut IngestionReport,
    ) -> Result<(), LedgerError> {
        let key = VersionKey::for_event(event);
        let from_tracked = !self.burners.contains(&event.from);
        let to_tracked = !self.burners.contains(&event.to);

        if !from_tracked && !to_tracked {
            report.burner_only_events += 1;
            return Ok(());
        }

        if event.from == event.to {
            let series = balances.entry(event.from).or_default();
            let unchanged = series.running_balance();
            series.record(key, unchanged);
            return Ok(());
        }

        let amount = I256::try_from(event.amount).map_err(|_| LedgerError::Overflow {
            pool: event.pool.to_string(),
            account: event.to.to_string(),
            block: event.block,
        })?;

        if from_tracked {
            let balance = Self::apply_delta(balances, event, &event.from, -amount)?;
            if balance.is_negative() {
                debug!(
                    "Negative balance {} for {} in pool {} at ({}, {})",
                    balance, event.from, event.pool, event.block, event.log_index
                );
                report.negative_balances += 1;
            }
        }
        if to_tracked {
            Self::apply_delta(balances, event, &event.to, amount)?;
        }
        Ok(())
    }

    fn apply_delta(
        balances: &mut PoolBalances,
        event: &Event,
        account: &AccountId,
        delta: I256,
    ) -> Result<I256, LedgerError> {
        let series = balances.entry(*account).or_default();
        let balance = series
            .running_balance()
            .checked_add(delta)
            .ok_or_else(|| LedgerError::Overflow {
                pool: event.pool.to_string(),
                account: account.to_string(),
                block: event.block,
            })?;
        Ok(series.record(VersionKey::for_event(event), balance))
    }

    /// Balance of `account` in `pool` after the latest event at or before `timestamp`.
    pub fn balance_as_of(&self, pool: &PoolId, account: &AccountId, timestamp: i64) -> I256 {
        self.series(pool, account)
            .map(|series| series.balance_as_of(timestamp))
            .unwrap_or(I256::ZERO)
    }

    /// Sum of all tracked balances in `pool` at `timestamp`.
    pub fn total_as_of(&self, pool: &PoolId, timestamp: i64) -> I256 {
        self.pools
            .get(pool)
            .map(|accounts| {
                accounts
                    .values()
                    .fold(I256::ZERO, |acc, series| acc + series.balance_as_of(timestamp))
            })
            .unwrap_or(I256::ZERO)
    }

    pub fn series(&self, pool: &PoolId, account: &AccountId) -> Option<&BalanceSeries> {
        self.pools.get(pool).and_then(|accounts| accounts.get(account))
    }

    pub fn accounts(&self, pool: &PoolId) -> impl Iterator<Item = &AccountId> {
        self.pools.get(pool).into_iter().flat_map(|accounts| accounts.keys())
    }

    pub fn contains_pool(&self, pool: &PoolId) -> bool {
        self.pools.contains_key(pool)
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }
}
