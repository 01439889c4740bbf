use alloy_primitives::{I256, U256};

const LIMB: f64 = 18_446_744_073_709_551_616.0; // 2^64

/// Nearest-ish `f64` of a 256-bit amount; precision loss past 2^53 is expected.
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * LIMB + *limb as f64)
}

pub fn i256_to_f64(value: I256) -> f64 {
    let magnitude = u256_to_f64(value.unsigned_abs());
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}
