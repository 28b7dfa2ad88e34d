//! Argument decoding and display rendering
//!
//! Argument types come from the registry's parsed `Function`; values are
//! rendered to JSON with known addresses annotated by name.

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{hex, Address, Selector};
use serde_json::Value;

use super::amount::format_token_amount;
use crate::types::ParsedArguments;

/// Selector of a calldata blob, if it is long enough to have one
pub fn get_selector(calldata: &[u8]) -> Option<Selector> {
    calldata.get(..4).map(Selector::from_slice)
}

/// ABI-decode the arguments following the selector
pub fn decode_arguments(
    function: &Function,
    calldata: &[u8],
) -> alloy::dyn_abi::Result<Vec<DynSolValue>> {
    let payload = calldata.get(4..).unwrap_or_default();
    function.abi_decode_input(payload, true)
}

/// Render decoded values as named display arguments.
///
/// `annotate` returns a registry name for known addresses; those are shown
/// as `0xAddress (NAME)`.
pub fn render_arguments<F>(function: &Function, values: &[DynSolValue], annotate: F) -> ParsedArguments
where
    F: Fn(&Address) -> Option<String>,
{
    let mut args = ParsedArguments::new();
    for (i, (input, value)) in function.inputs.iter().zip(values).enumerate() {
        let name = if input.name.is_empty() {
            format!("arg{i}")
        } else {
            input.name.clone()
        };
        args.push(name, render_value(value, &annotate));
    }
    args
}

/// Replace the `amount` argument with a decimal string scaled by `decimals`
pub fn rescale_amount(args: &mut ParsedArguments, values: &[DynSolValue], function: &Function, decimals: u8) {
    let amount = function
        .inputs
        .iter()
        .zip(values)
        .find(|(input, _)| input.name == "amount")
        .and_then(|(_, value)| match value {
            DynSolValue::Uint(amount, _) => Some(*amount),
            _ => None,
        });

    if let (Some(amount), Some(slot)) = (amount, args.get_mut("amount")) {
        *slot = Value::String(format_token_amount(amount, decimals));
    }
}

fn render_value<F>(val: &DynSolValue, annotate: &F) -> Value
where
    F: Fn(&Address) -> Option<String>,
{
    match val {
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Int(i, _) => Value::String(i.to_string()),
        DynSolValue::Uint(u, _) => Value::String(u.to_string()),
        // FixedBytes: word is 32 bytes, size is actual length (e.g., 4 for bytes4)
        // bytesN is right-padded, so take first `size` bytes
        DynSolValue::FixedBytes(word, size) => {
            Value::String(format!("0x{}", hex::encode(&word.as_slice()[..*size])))
        }
        DynSolValue::Address(a) => match annotate(a) {
            Some(name) => Value::String(format!("{a} ({name})")),
            None => Value::String(a.to_string()),
        },
        DynSolValue::Function(f) => Value::String(format!("0x{}", hex::encode(f))),
        DynSolValue::Bytes(b) => Value::String(format!("0x{}", hex::encode(b))),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            Value::Array(items.iter().map(|v| render_value(v, annotate)).collect())
        }
        DynSolValue::CustomStruct { tuple, .. } => {
            Value::Array(tuple.iter().map(|v| render_value(v, annotate)).collect())
        }
    }
}
