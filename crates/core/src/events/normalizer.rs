use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

use super::coerce::{
    require, to_address, to_decimal, to_i64, to_scaled_decimal, to_u256, to_u32, to_u64,
};
use super::{
    Event, Feed, IngestionError, NormalizedTransfers, PriceObservation, RawReferenceFeed,
    RawTransferBlock, RawVirtualPrice, RecordLocation,
};
use crate::constants::VIRTUAL_PRICE_DECIMALS;
use crate::registry::{PoolId, PoolRegistry};

/// Turns raw feed records into typed, ordered events and price observations.
///
/// Normalization is all-or-nothing: the first malformed record aborts the
/// pass, since a ledger built from an incomplete history is wrong everywhere
/// after the gap.
pub struct EventNormalizer<'a> {
    registry: &'a PoolRegistry,
}

impl<'a> EventNormalizer<'a> {
    pub fn new(registry: &'a PoolRegistry) -> Self {
        Self { registry }
    }

    /// Groups transfers per pool, sorted by `(block, log_index)`, and collects
    /// the account universe.
    pub fn normalize_transfers(
        &self,
        blocks: &[RawTransferBlock],
    ) -> Result<NormalizedTransfers, IngestionError> {
        let mut events_by_pool: BTreeMap<PoolId, Vec<Event>> = BTreeMap::new();
        let mut accounts = BTreeSet::new();
        let mut max_timestamp: Option<i64> = None;

        for (record_idx, raw_block) in blocks.iter().enumerate() {
            let block_location = RecordLocation::new(Feed::Transfers, record_idx);
            let timestamp = to_i64(
                require(raw_block.timestamp.as_ref(), &block_location, "timestamp")?,
                &block_location,
                "timestamp",
            )?;
            let block = to_u64(
                require(raw_block.block.as_ref(), &block_location, "block")?,
                &block_location,
                "block",
            )?;
            let transfers = require(raw_block.transfers.as_ref(), &block_location, "transfers")?;

            for (transfer_idx, raw) in transfers.iter().enumerate() {
                let location = block_location
                    .clone()
                    .with_transfer(transfer_idx)
                    .with_pool(raw.address.as_deref());

                let pool = to_address(
                    require(raw.address.as_ref(), &location, "address")?,
                    &location,
                    "address",
                )?;
                let from = to_address(
                    require(raw.from.as_ref(), &location, "from")?,
                    &location,
                    "from",
                )?;
                let to = to_address(require(raw.to.as_ref(), &location, "to")?, &location, "to")?;
                let amount = to_u256(
                    require(raw.value.as_ref(), &location, "value")?,
                    &location,
                    "value",
                )?;
                let log_index = to_u32(
                    require(raw.log_index.as_ref(), &location, "logIndex")?,
                    &location,
                    "logIndex",
                )?;

                if !self.registry.is_burner(&from) {
                    accounts.insert(from);
                }
                if !self.registry.is_burner(&to) {
                    accounts.insert(to);
                }
                max_timestamp = Some(max_timestamp.map_or(timestamp, |m| m.max(timestamp)));

                events_by_pool.entry(pool).or_default().push(Event {
                    pool,
                    from,
                    to,
                    amount,
                    timestamp,
                    block,
                    log_index,
                });
            }
        }

        for (pool, events) in events_by_pool.iter_mut() {
            // Stable: duplicated records keep feed order.
            events.sort_by_key(Event::position);
            if !self.registry.is_tracked(pool) {
                debug!(
                    "Pool {} is not in the registry; its {} transfers only contribute accounts",
                    pool,
                    events.len()
                );
            }
        }

        let normalized = NormalizedTransfers {
            events_by_pool,
            accounts: accounts.into_iter().collect(),
            max_timestamp,
        };
        info!(
            "Normalized {} transfers across {} pools ({} accounts)",
            normalized.event_count(),
            normalized.events_by_pool.len(),
            normalized.accounts.len()
        );
        Ok(normalized)
    }

    /// Maps virtual-price records to their pool token and sorts them by block.
    pub fn normalize_virtual_prices(
        &self,
        records: &[RawVirtualPrice],
    ) -> Result<BTreeMap<PoolId, Vec<PriceObservation>>, IngestionError> {
        let mut by_pool: BTreeMap<PoolId, Vec<PriceObservation>> = BTreeMap::new();

        for (record_idx, raw) in records.iter().enumerate() {
            let location =
                RecordLocation::new(Feed::VirtualPrices, record_idx).with_pool(raw.address.as_deref());

            let swap = to_address(
                require(raw.address.as_ref(), &location, "address")?,
                &location,
                "address",
            )?;
            let pool = self
                .registry
                .pool_for_swap(&swap)
                .ok_or_else(|| IngestionError::UnknownPriceSource {
                    location: location.clone(),
                    address: swap.to_string(),
                })?;
            let block = to_u64(
                require(raw.block.as_ref(), &location, "block")?,
                &location,
                "block",
            )?;
            let timestamp = to_i64(
                require(raw.timestamp.as_ref(), &location, "timestamp")?,
                &location,
                "timestamp",
            )?;
            let price = to_scaled_decimal(
                require(raw.virtual_price.as_ref(), &location, "virtualPrice")?,
                VIRTUAL_PRICE_DECIMALS,
                &location,
                "virtualPrice",
            )?;

            by_pool.entry(pool.token).or_default().push(PriceObservation {
                timestamp,
                block: Some(block),
                price,
            });
        }

        for observations in by_pool.values_mut() {
            observations.sort_by_key(|o| o.block);
        }
        for pool in self.registry.pools() {
            if !by_pool.contains_key(&pool.token) {
                warn!(
                    "No virtual price observations for pool {} ({})",
                    pool.display_name(),
                    pool.token
                );
            }
        }

        Ok(by_pool)
    }

    /// Converts `(timestamp_millis, price)` pairs into observations keyed in seconds.
    pub fn normalize_reference_prices(
        &self,
        feed: &RawReferenceFeed,
    ) -> Result<Vec<PriceObservation>, IngestionError> {
        feed.points()
            .iter()
            .enumerate()
            .map(|(record_idx, (raw_ts, raw_price))| {
                let location = RecordLocation::new(Feed::ReferencePrices, record_idx);
                let millis = to_i64(raw_ts, &location, "timestamp")?;
                let price = to_decimal(raw_price, &location, "price")?;
                Ok(PriceObservation {
                    timestamp: millis.div_euclid(1000),
                    block: None,
                    price,
                })
            })
            .collect()
    }
}
