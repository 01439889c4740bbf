use num_traits::ToPrimitive;

use super::PriceError;
use crate::events::PriceObservation;

/// Piecewise-linear price curve over unix timestamps.
///
/// Outside the observed range the curve is flat at the first or last observed
/// value. Several observations at the same timestamp collapse to the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSpline {
    timestamps: Vec<i64>,
    values: Vec<f64>,
}

impl PriceSpline {
    pub fn from_points(mut points: Vec<(i64, f64)>, subject: &str) -> Result<Self, PriceError> {
        if points.is_empty() {
            return Err(PriceError::NoObservations(subject.to_string()));
        }
        points.sort_by_key(|(ts, _)| *ts);

        let mut timestamps: Vec<i64> = Vec::with_capacity(points.len());
        let mut values: Vec<f64> = Vec::with_capacity(points.len());
        for (ts, value) in points {
            if timestamps.last() == Some(&ts) {
                if let Some(last) = values.last_mut() {
                    *last = value;
                }
                continue;
            }
            timestamps.push(ts);
            values.push(value);
        }

        Ok(Self { timestamps, values })
    }

    pub fn from_observations(
        observations: &[PriceObservation],
        subject: &str,
    ) -> Result<Self, PriceError> {
        let points = observations
            .iter()
            .map(|o| {
                o.price
                    .to_f64()
                    .map(|p| (o.timestamp, p))
                    .ok_or_else(|| PriceError::NotRepresentable {
                        subject: subject.to_string(),
                        timestamp: o.timestamp,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_points(points, subject)
    }

    /// Interpolated value at `timestamp`, clamped to the observed range.
    pub fn value_at(&self, timestamp: i64) -> f64 {
        let last = self.timestamps.len() - 1;
        if timestamp <= self.timestamps[0] {
            return self.values[0];
        }
        if timestamp >= self.timestamps[last] {
            return self.values[last];
        }

        // First knot strictly after `timestamp`; in 1..=last given the checks above.
        let hi = self.timestamps.partition_point(|ts| *ts <= timestamp);
        let lo = hi - 1;
        let (t0, t1) = (self.timestamps[lo] as f64, self.timestamps[hi] as f64);
        let (v0, v1) = (self.values[lo], self.values[hi]);
        v0 + (v1 - v0) * (timestamp as f64 - t0) / (t1 - t0)
    }

    pub fn range(&self) -> (i64, i64) {
        (self.timestamps[0], self.timestamps[self.timestamps.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}
