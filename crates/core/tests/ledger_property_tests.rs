//! Property-based tests for the balance ledger and the accumulator.

use alloy_primitives::{I256, U256};
use proptest::prelude::*;

use lpshare_core::events::Event;
use lpshare_core::integrals::{IntegralAccumulator, TimeGrid};
use lpshare_core::ledger::BalanceLedger;
use lpshare_core::prices::{PriceSpline, SplinePriceOracle};
use lpshare_core::registry::{Address, BurnerSet, Denomination, PoolDefinition};
use lpshare_core::snapshot::SnapshotExporter;

// =============================================================================
// Generators
// =============================================================================

const POOL: u8 = 0xb1;
const BURNER: u8 = 0;

fn addr(last: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = last;
    Address::new(bytes)
}

/// Transfers between five accounts and the zero address, with
/// non-decreasing timestamps and strictly increasing positions.
fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((0u8..6, 0u8..6, 0u64..1_000, 0i64..3), 0..60).prop_map(|steps| {
        let mut timestamp = 1_000;
        steps
            .into_iter()
            .enumerate()
            .map(|(i, (from, to, amount, gap))| {
                timestamp += gap * 10;
                Event {
                    pool: addr(POOL),
                    from: addr(from),
                    to: addr(to),
                    amount: U256::from(amount),
                    timestamp,
                    block: (i / 3) as u64,
                    log_index: (i % 3) as u32,
                }
            })
            .collect()
    })
}

fn to_i128(value: I256) -> i128 {
    value.to_string().parse().unwrap()
}

fn ingest(events: &[Event]) -> BalanceLedger {
    let mut ledger = BalanceLedger::new(BurnerSet::new([addr(BURNER)]));
    ledger.ingest(addr(POOL), events).unwrap();
    ledger
}

/// Straight replay without the ledger: balance after the last event at or
/// before `timestamp`.
fn naive_balance(events: &[Event], account: Address, timestamp: i64) -> i128 {
    let mut balance = 0i128;
    for event in events.iter().filter(|e| e.timestamp <= timestamp) {
        let amount = event.amount.to::<u128>() as i128;
        if event.from == event.to {
            continue;
        }
        if event.from == account {
            balance -= amount;
        }
        if event.to == account {
            balance += amount;
        }
    }
    balance
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_floor_query_matches_replay(events in arb_events(), probe in 900i64..2_800) {
        let ledger = ingest(&events);
        for account in 1u8..6 {
            let expected = naive_balance(&events, addr(account), probe);
            let actual = to_i128(ledger.balance_as_of(&addr(POOL), &addr(account), probe));
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn prop_total_equals_net_burner_flow(events in arb_events(), probe in 900i64..2_800) {
        let ledger = ingest(&events);
        let net: i128 = events
            .iter()
            .filter(|e| e.timestamp <= probe && e.from != e.to)
            .map(|e| {
                let amount = e.amount.to::<u128>() as i128;
                match (e.from == addr(BURNER), e.to == addr(BURNER)) {
                    (true, false) => amount,
                    (false, true) => -amount,
                    _ => 0,
                }
            })
            .sum();
        prop_assert_eq!(to_i128(ledger.total_as_of(&addr(POOL), probe)), net);
    }

    #[test]
    fn prop_fractions_sum_to_one(
        deposits in prop::collection::vec(1u64..1_000_000, 1..12),
        price in 0.5f64..2.0,
        steps in 1i64..20,
    ) {
        let pool = PoolDefinition {
            swap: addr(0xa1),
            token: addr(POOL),
            denomination: Denomination::Usd,
            label: None,
        };
        let accounts: Vec<Address> = (1..=deposits.len() as u8).map(addr).collect();
        let events: Vec<Event> = deposits
            .iter()
            .zip(&accounts)
            .enumerate()
            .map(|(i, (amount, account))| Event {
                pool: pool.token,
                from: addr(BURNER),
                to: *account,
                amount: U256::from(*amount),
                timestamp: 100 + i as i64,
                block: i as u64,
                log_index: 0,
            })
            .collect();
        let ledger = ingest(&events);
        let oracle = SplinePriceOracle::new()
            .with_pool(pool.token, PriceSpline::from_points(vec![(0, price), (10_000, price * 1.1)], "vp").unwrap());
        let grid = TimeGrid::new(1_000, 1_000 + steps * 500, 500).unwrap();

        let result = IntegralAccumulator::new(&[pool])
            .with_history(true)
            .run(&ledger, &oracle, &accounts, &grid)
            .unwrap();
        let snapshot = SnapshotExporter::export(&result);

        prop_assert!((snapshot.fraction_sum() - 1.0).abs() < 1e-9);
        for integral in result.integrals.values() {
            prop_assert!(integral.history.windows(2).all(|pair| pair[1].1 >= pair[0].1));
        }
    }
}
