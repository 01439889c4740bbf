use log::debug;
use std::collections::{BTreeMap, HashMap};

use super::{PriceError, PriceSpline};
use crate::events::PriceObservation;
use crate::registry::{Denomination, PoolDefinition, PoolId, PoolRegistry};

/// Source of value multipliers for pool balances.
pub trait PriceOracle: Send + Sync {
    /// Virtual price of one raw pool token, in the pool's own denomination.
    fn virtual_price(&self, pool: &PoolId, timestamp: i64) -> Result<f64, PriceError>;

    /// USD price of one unit of `denomination`.
    fn reference_price(
        &self,
        denomination: Denomination,
        timestamp: i64,
    ) -> Result<f64, PriceError>;

    /// Multiplier converting a raw balance of `pool` into the common value unit.
    fn multiplier(&self, pool: &PoolDefinition, timestamp: i64) -> Result<f64, PriceError> {
        let virtual_price = self.virtual_price(&pool.token, timestamp)?;
        if pool.denomination.needs_reference() {
            Ok(virtual_price * self.reference_price(pool.denomination, timestamp)?)
        } else {
            Ok(virtual_price)
        }
    }
}

/// Oracle backed by one interpolated curve per pool and per reference unit.
#[derive(Debug, Clone, Default)]
pub struct SplinePriceOracle {
    pools: HashMap<PoolId, PriceSpline>,
    references: HashMap<Denomination, PriceSpline>,
}

impl SplinePriceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, pool: PoolId, spline: PriceSpline) -> Self {
        self.pools.insert(pool, spline);
        self
    }

    pub fn with_reference(mut self, denomination: Denomination, spline: PriceSpline) -> Self {
        self.references.insert(denomination, spline);
        self
    }

    /// Builds curves for every registered pool, failing fast when a pool has no
    /// observations or a required reference feed is absent.
    pub fn build(
        registry: &PoolRegistry,
        virtual_prices: &BTreeMap<PoolId, Vec<PriceObservation>>,
        reference_prices: &BTreeMap<Denomination, Vec<PriceObservation>>,
    ) -> Result<Self, PriceError> {
        let mut oracle = Self::new();

        for pool in registry.pools() {
            let subject = format!("pool {} ({})", pool.display_name(), pool.token);
            let observations = virtual_prices
                .get(&pool.token)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let spline = PriceSpline::from_observations(observations, &subject)?;
            debug!(
                "Price curve for {}: {} knots over {:?}",
                subject,
                spline.len(),
                spline.range()
            );
            oracle.pools.insert(pool.token, spline);
        }

        for denomination in registry.required_references() {
            let observations = reference_prices
                .get(&denomination)
                .ok_or(PriceError::MissingReference(denomination))?;
            let subject = format!("{} reference", denomination);
            let spline = PriceSpline::from_observations(observations, &subject)?;
            oracle.references.insert(denomination, spline);
        }

        Ok(oracle)
    }
}

impl PriceOracle for SplinePriceOracle {
    fn virtual_price(&self, pool: &PoolId, timestamp: i64) -> Result<f64, PriceError> {
        self.pools
            .get(pool)
            .map(|spline| spline.value_at(timestamp))
            .ok_or_else(|| PriceError::UnknownPool(pool.to_string()))
    }

    fn reference_price(
        &self,
        denomination: Denomination,
        timestamp: i64,
    ) -> Result<f64, PriceError> {
        if !denomination.needs_reference() {
            return Ok(1.0);
        }
        self.references
            .get(&denomination)
            .map(|spline| spline.value_at(timestamp))
            .ok_or(PriceError::MissingReference(denomination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Address, BurnerSet};
    use rust_decimal_macros::dec;

    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address::new(bytes)
    }

    fn registry() -> PoolRegistry {
        PoolRegistry::new(
            vec![
                PoolDefinition {
                    swap: addr(1),
                    token: addr(2),
                    denomination: Denomination::Usd,
                    label: None,
                },
                PoolDefinition {
                    swap: addr(3),
                    token: addr(4),
                    denomination: Denomination::Btc,
                    label: Some("ren".to_string()),
                },
            ],
            BurnerSet::default(),
        )
        .unwrap()
    }

    fn obs(timestamp: i64, price: rust_decimal::Decimal) -> PriceObservation {
        PriceObservation {
            timestamp,
            block: None,
            price,
        }
    }

    #[test]
    fn test_btc_pool_multiplier_composes_reference() {
        let mut vps = BTreeMap::new();
        vps.insert(addr(2), vec![obs(0, dec!(1.0)), obs(100, dec!(1.2))]);
        vps.insert(addr(4), vec![obs(0, dec!(1.0))]);
        let mut refs = BTreeMap::new();
        refs.insert(Denomination::Btc, vec![obs(0, dec!(8000)), obs(100, dec!(10000))]);

        let registry = registry();
        let oracle = SplinePriceOracle::build(&registry, &vps, &refs).unwrap();

        let usd = &registry.pools()[0];
        let btc = &registry.pools()[1];
        assert!((oracle.multiplier(usd, 50).unwrap() - 1.1).abs() < 1e-12);
        assert_eq!(oracle.multiplier(btc, 50).unwrap(), 9000.0);
        assert_eq!(oracle.reference_price(Denomination::Usd, 50).unwrap(), 1.0);
    }

    #[test]
    fn test_build_fails_without_reference_feed() {
        let mut vps = BTreeMap::new();
        vps.insert(addr(2), vec![obs(0, dec!(1.0))]);
        vps.insert(addr(4), vec![obs(0, dec!(1.0))]);

        let err = SplinePriceOracle::build(&registry(), &vps, &BTreeMap::new()).unwrap_err();
        assert_eq!(err, PriceError::MissingReference(Denomination::Btc));
    }

    #[test]
    fn test_build_fails_for_pool_without_prices() {
        let mut vps = BTreeMap::new();
        vps.insert(addr(2), vec![obs(0, dec!(1.0))]);

        let err = SplinePriceOracle::build(&registry(), &vps, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, PriceError::NoObservations(subject) if subject.contains("ren")));
    }

    #[test]
    fn test_unknown_pool_lookup() {
        let oracle = SplinePriceOracle::new();
        assert_eq!(
            oracle.virtual_price(&addr(9), 0),
            Err(PriceError::UnknownPool(addr(9).to_string()))
        );
    }
}
