//! Field coercion for raw feed records.
//!
//! Feeds produced by different indexers disagree on whether integers are JSON
//! numbers or decimal strings, so every numeric field accepts both. Integers
//! that do not fit in 64 bits must be strings: serde_json reads them as floats.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde_json::Value;

use super::{IngestionError, RecordLocation};
use crate::registry::Address;

pub(crate) fn require<'a, T>(
    value: Option<&'a T>,
    location: &RecordLocation,
    field: &'static str,
) -> Result<&'a T, IngestionError> {
    value.ok_or_else(|| IngestionError::MissingField {
        location: location.clone(),
        field,
    })
}

fn invalid(
    location: &RecordLocation,
    field: &'static str,
    value: &Value,
    reason: &str,
) -> IngestionError {
    IngestionError::InvalidField {
        location: location.clone(),
        field,
        value: display_value(value),
        reason: reason.to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn to_i64(
    value: &Value,
    location: &RecordLocation,
    field: &'static str,
) -> Result<i64, IngestionError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(location, field, value, "expected an integer"))
}

pub(crate) fn to_u64(
    value: &Value,
    location: &RecordLocation,
    field: &'static str,
) -> Result<u64, IngestionError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(location, field, value, "expected a non-negative integer"))
}

pub(crate) fn to_u32(
    value: &Value,
    location: &RecordLocation,
    field: &'static str,
) -> Result<u32, IngestionError> {
    let wide = to_u64(value, location, field)?;
    u32::try_from(wide).map_err(|_| invalid(location, field, value, "does not fit in 32 bits"))
}

/// Parses a token amount. Strings may be decimal or `0x` hex.
pub(crate) fn to_u256(
    value: &Value,
    location: &RecordLocation,
    field: &'static str,
) -> Result<U256, IngestionError> {
    match value {
        Value::Number(n) => n.as_u64().map(U256::from).ok_or_else(|| {
            invalid(
                location,
                field,
                value,
                "expected a non-negative integer (encode values above 2^64 as strings)",
            )
        }),
        Value::String(s) => s
            .trim()
            .parse::<U256>()
            .map_err(|e| invalid(location, field, value, &e.to_string())),
        _ => Err(invalid(location, field, value, "expected an integer")),
    }
}

/// Converts an integer scaled by `10^decimals` into a decimal.
pub(crate) fn to_scaled_decimal(
    value: &Value,
    decimals: u32,
    location: &RecordLocation,
    field: &'static str,
) -> Result<Decimal, IngestionError> {
    let raw = to_u256(value, location, field)?;
    let mantissa = u128::try_from(raw)
        .ok()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or_else(|| invalid(location, field, value, "too large for a decimal price"))?;
    Decimal::try_from_i128_with_scale(mantissa, decimals)
        .map_err(|e| invalid(location, field, value, &e.to_string()))
}

pub(crate) fn to_decimal(
    value: &Value,
    location: &RecordLocation,
    field: &'static str,
) -> Result<Decimal, IngestionError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(|f| Decimal::try_from(f).ok())
            .ok_or_else(|| invalid(location, field, value, "expected a finite number")),
        Value::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| invalid(location, field, value, &e.to_string())),
        _ => Err(invalid(location, field, value, "expected a number")),
    }
}

pub(crate) fn to_address(
    raw: &str,
    location: &RecordLocation,
    field: &'static str,
) -> Result<Address, IngestionError> {
    raw.parse::<Address>()
        .map_err(|e| IngestionError::InvalidField {
            location: location.clone(),
            field,
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Feed;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn loc() -> RecordLocation {
        RecordLocation::new(Feed::Transfers, 0)
    }

    #[test]
    fn test_integers_accept_numbers_and_strings() {
        assert_eq!(to_i64(&json!(1600000000), &loc(), "timestamp").unwrap(), 1_600_000_000);
        assert_eq!(to_i64(&json!(" 42 "), &loc(), "timestamp").unwrap(), 42);
        assert_eq!(to_u32(&json!("7"), &loc(), "logIndex").unwrap(), 7);
        assert!(to_u32(&json!(5_000_000_000u64), &loc(), "logIndex").is_err());
        assert!(to_u64(&json!(-1), &loc(), "block").is_err());
        assert!(to_u64(&json!(true), &loc(), "block").is_err());
    }

    #[test]
    fn test_amounts_parse_wide_strings() {
        let big = to_u256(&json!("123456789012345678901234567890"), &loc(), "value").unwrap();
        assert_eq!(big.to_string(), "123456789012345678901234567890");
        let hex = to_u256(&json!("0xff"), &loc(), "value").unwrap();
        assert_eq!(hex, U256::from(255u64));
        assert!(to_u256(&json!(1.5e30), &loc(), "value").is_err());
    }

    #[test]
    fn test_scaled_decimal() {
        let vp = to_scaled_decimal(&json!("1012345000000000000"), 18, &loc(), "virtualPrice")
            .unwrap();
        assert_eq!(vp, dec!(1.012345));
    }

    #[test]
    fn test_invalid_field_reports_value() {
        let err = to_i64(&json!("abc"), &loc(), "timestamp").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("timestamp"));
        assert!(message.contains("abc"));
    }
}
