//! Serde helpers for non-negative arbitrary-precision integers
//!
//! Transaction records carry numbers as JSON integers, decimal strings or
//! `0x` hex strings depending on who produced them. All three are accepted;
//! negatives and fractions are rejected. Output is always a decimal string.

use alloy::primitives::U256;
use serde::de;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Parse a decimal or `0x`-prefixed hex string into a `U256`
pub fn parse_u256(raw: &str) -> Result<U256, String> {
    let raw = raw.trim();
    if raw.starts_with('-') {
        return Err(format!("negative value '{raw}'"));
    }
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        U256::from_str_radix(hex, 16).map_err(|e| format!("invalid hex integer '{raw}': {e}"))
    } else {
        U256::from_str_radix(raw, 10).map_err(|e| format!("invalid integer '{raw}': {e}"))
    }
}

pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    // serde_json keeps the literal text of numbers (arbitrary_precision), so
    // integers beyond u64 arrive intact
    match Value::deserialize(deserializer)? {
        Value::Number(n) => parse_u256(&n.to_string()).map_err(de::Error::custom),
        Value::String(s) => parse_u256(&s).map_err(de::Error::custom),
        other => Err(de::Error::custom(format!(
            "expected a non-negative integer, decimal string or 0x hex string, got {other}"
        ))),
    }
}
