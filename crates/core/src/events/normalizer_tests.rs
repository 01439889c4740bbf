use crate::events::{EventNormalizer, Feed, IngestionError, RawInputs, RawReferenceFeed};
use crate::registry::{Address, BurnerSet, Denomination, PoolDefinition, PoolRegistry};
use alloy_primitives::U256;
use rust_decimal_macros::dec;

const POOL: &str = "0x00000000000000000000000000000000000000b1";
const SWAP: &str = "0x00000000000000000000000000000000000000a1";
const ALICE: &str = "0x000000000000000000000000000000000000a11c";
const BOB: &str = "0x0000000000000000000000000000000000000b0b";
const ZERO: &str = "0x0000000000000000000000000000000000000000";

fn registry() -> PoolRegistry {
    PoolRegistry::new(
        vec![PoolDefinition {
            swap: SWAP.parse().unwrap(),
            token: POOL.parse().unwrap(),
            denomination: Denomination::Usd,
            label: Some("test".to_string()),
        }],
        BurnerSet::new([Address::ZERO]),
    )
    .unwrap()
}

fn parse(transfers: &str) -> RawInputs {
    RawInputs::from_json_strs(transfers, "[]", None).unwrap()
}

#[test]
fn test_transfers_are_sorted_by_block_and_log_index() {
    let inputs = parse(&format!(
        r#"[
            {{"timestamp": "200", "block": "11", "transfers": [
                {{"address": "{POOL}", "from": "{ALICE}", "to": "{BOB}", "value": "5", "logIndex": "3"}},
                {{"address": "{POOL}", "from": "{ZERO}", "to": "{ALICE}", "value": "7", "logIndex": "1"}}
            ]}},
            {{"timestamp": 100, "block": 10, "transfers": [
                {{"address": "{POOL}", "from": "{ZERO}", "to": "{ALICE}", "value": 100, "logIndex": 9}}
            ]}}
        ]"#
    ));
    let registry = registry();
    let normalized = EventNormalizer::new(&registry)
        .normalize_transfers(&inputs.transfers)
        .unwrap();

    let pool: Address = POOL.parse().unwrap();
    let positions: Vec<(u64, u32)> = normalized.events(&pool).iter().map(|e| e.position()).collect();
    assert_eq!(positions, vec![(10, 9), (11, 1), (11, 3)]);

    let first = &normalized.events(&pool)[0];
    assert_eq!(first.timestamp, 100);
    assert_eq!(first.amount, U256::from(100u64));
    assert_eq!(normalized.max_timestamp, Some(200));
}

#[test]
fn test_account_universe_excludes_burners_and_is_sorted() {
    let inputs = parse(&format!(
        r#"[{{"timestamp": 1, "block": 1, "transfers": [
            {{"address": "{POOL}", "from": "{ZERO}", "to": "{BOB}", "value": "1", "logIndex": 0}},
            {{"address": "{POOL}", "from": "{ZERO}", "to": "{ALICE}", "value": "1", "logIndex": 1}}
        ]}}]"#
    ));
    let registry = registry();
    let normalized = EventNormalizer::new(&registry)
        .normalize_transfers(&inputs.transfers)
        .unwrap();

    let alice: Address = ALICE.parse().unwrap();
    let bob: Address = BOB.parse().unwrap();
    assert_eq!(normalized.accounts, vec![bob, alice]);
}

#[test]
fn test_untracked_pool_accounts_are_still_collected() {
    let other_pool = "0x00000000000000000000000000000000000000ff";
    let inputs = parse(&format!(
        r#"[{{"timestamp": 1, "block": 1, "transfers": [
            {{"address": "{other_pool}", "from": "{ZERO}", "to": "{BOB}", "value": "1", "logIndex": 0}}
        ]}}]"#
    ));
    let registry = registry();
    let normalized = EventNormalizer::new(&registry)
        .normalize_transfers(&inputs.transfers)
        .unwrap();
    assert_eq!(normalized.accounts.len(), 1);
    assert_eq!(normalized.events_by_pool.len(), 1);
}

#[test]
fn test_missing_field_names_record_pool_and_field() {
    let inputs = parse(&format!(
        r#"[
            {{"timestamp": 1, "block": 1, "transfers": []}},
            {{"timestamp": 2, "block": 2, "transfers": [
                {{"address": "{POOL}", "from": "{ZERO}", "to": "{BOB}", "value": "1", "logIndex": 0}},
                {{"address": "{POOL}", "from": "{ZERO}", "to": "{BOB}", "logIndex": 1}}
            ]}}
        ]"#
    ));
    let registry = registry();
    let err = EventNormalizer::new(&registry)
        .normalize_transfers(&inputs.transfers)
        .unwrap_err();

    match &err {
        IngestionError::MissingField { location, field } => {
            assert_eq!(*field, "value");
            assert_eq!(location.feed, Feed::Transfers);
            assert_eq!(location.record, 1);
            assert_eq!(location.transfer, Some(1));
            assert_eq!(location.pool.as_deref(), Some(POOL));
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("record #1"));
    assert!(message.contains(POOL));
    assert!(message.contains("'value'"));
}

#[test]
fn test_missing_block_level_field() {
    let inputs = parse(r#"[{"block": 1, "transfers": []}]"#);
    let registry = registry();
    let err = EventNormalizer::new(&registry)
        .normalize_transfers(&inputs.transfers)
        .unwrap_err();
    assert!(matches!(
        err,
        IngestionError::MissingField {
            field: "timestamp",
            ..
        }
    ));
}

#[test]
fn test_invalid_address_is_fatal() {
    let inputs = parse(&format!(
        r#"[{{"timestamp": 1, "block": 1, "transfers": [
            {{"address": "{POOL}", "from": "0xnothex", "to": "{BOB}", "value": "1", "logIndex": 0}}
        ]}}]"#
    ));
    let registry = registry();
    let err = EventNormalizer::new(&registry)
        .normalize_transfers(&inputs.transfers)
        .unwrap_err();
    assert!(matches!(err, IngestionError::InvalidField { field: "from", .. }));
}

#[test]
fn test_virtual_prices_map_swap_to_token_and_scale() {
    let raw = format!(
        r#"[
            {{"address": "{SWAP}", "block": "20", "timestamp": "2000", "virtualPrice": "1020000000000000000"}},
            {{"address": "{SWAP}", "block": "10", "timestamp": "1000", "virtualPrice": "1000000000000000000"}}
        ]"#
    );
    let inputs = RawInputs::from_json_strs("[]", &raw, None).unwrap();
    let registry = registry();
    let prices = EventNormalizer::new(&registry)
        .normalize_virtual_prices(&inputs.virtual_prices)
        .unwrap();

    let pool: Address = POOL.parse().unwrap();
    let observations = &prices[&pool];
    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].timestamp, 1000);
    assert_eq!(observations[0].price, dec!(1));
    assert_eq!(observations[1].price, dec!(1.02));
}

#[test]
fn test_unknown_price_source_is_fatal() {
    let raw = r#"[{"address": "0x00000000000000000000000000000000000000ee", "block": 1, "timestamp": 1, "virtualPrice": "1"}]"#;
    let inputs = RawInputs::from_json_strs("[]", raw, None).unwrap();
    let registry = registry();
    let err = EventNormalizer::new(&registry)
        .normalize_virtual_prices(&inputs.virtual_prices)
        .unwrap_err();
    assert!(matches!(err, IngestionError::UnknownPriceSource { .. }));
}

#[test]
fn test_reference_prices_accept_both_layouts() {
    let registry = registry();
    let normalizer = EventNormalizer::new(&registry);

    let wrapped: RawReferenceFeed =
        serde_json::from_str(r#"{"prices": [[1580000000000, 8500.5], [1580086400000, 8600]]}"#)
            .unwrap();
    let bare: RawReferenceFeed =
        serde_json::from_str(r#"[[1580000000000, 8500.5], [1580086400000, 8600]]"#).unwrap();

    let a = normalizer.normalize_reference_prices(&wrapped).unwrap();
    let b = normalizer.normalize_reference_prices(&bare).unwrap();
    assert_eq!(a, b);
    assert_eq!(a[0].timestamp, 1_580_000_000);
    assert_eq!(a[0].price, dec!(8500.5));
    assert_eq!(a[1].price, dec!(8600));
}

#[test]
fn test_malformed_json_names_feed() {
    let err = RawInputs::from_json_strs("[{", "[]", None).unwrap_err();
    assert!(matches!(
        err,
        IngestionError::Parse {
            feed: Feed::Transfers,
            ..
        }
    ));
}
