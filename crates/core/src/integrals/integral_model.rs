//! Integral accumulator models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::ConfigError;
use crate::registry::{AccountId, PoolDefinition};
use crate::utils::time_utils::get_grid_points;

/// Uniform sampling grid `start, start + step, ...` with `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeGrid {
    pub start: i64,
    pub end: i64,
    pub step_seconds: i64,
}

impl TimeGrid {
    pub fn new(start: i64, end: i64, step_seconds: i64) -> Result<Self, ConfigError> {
        let grid = Self {
            start,
            end,
            step_seconds,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_seconds <= 0 {
            return Err(ConfigError::InvalidStep(self.step_seconds));
        }
        Ok(())
    }

    pub fn points(&self) -> Vec<i64> {
        get_grid_points(self.start, self.end, self.step_seconds)
    }

    pub fn step_count(&self) -> usize {
        self.points().len()
    }
}

/// Running sum of one account's share of total value, one term per grid step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIntegral {
    /// Grid timestamp of the most recent term.
    pub last_timestamp: i64,
    pub value: f64,
    /// `(timestamp, value)` after each step; only filled when history is tracked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<(i64, f64)>,
}

impl UserIntegral {
    pub(crate) fn add(&mut self, timestamp: i64, share: f64, track_history: bool) {
        self.value += share;
        self.last_timestamp = timestamp;
        if track_history {
            self.history.push((timestamp, self.value));
        }
    }
}

/// Valuation totals of one grid step, in raw token units times multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    pub timestamp: i64,
    pub total_value: f64,
    /// One entry per pool, in registry order.
    pub pool_values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulationResult {
    pub integrals: BTreeMap<AccountId, UserIntegral>,
    pub steps: Vec<StepSummary>,
    pub steps_processed: u64,
    /// Pools in the order used for every summation and for `StepSummary::pool_values`.
    pub pools: Vec<PoolDefinition>,
}

impl AccumulationResult {
    pub fn integral(&self, account: &AccountId) -> Option<&UserIntegral> {
        self.integrals.get(account)
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.steps.last().map(|step| step.timestamp)
    }
}
