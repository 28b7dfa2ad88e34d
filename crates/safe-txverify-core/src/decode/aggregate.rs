//! Multicall3 `aggregate3` / `aggregate3Value` call arrays

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes};

/// One `(target, callData)` pair of an aggregate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateCall {
    pub target: Address,
    pub call_data: Bytes,
}

/// Pull `(target, callData)` out of a decoded `Call3[]` or `Call3Value[]` argument.
///
/// Both struct layouts start with the target and end with the calldata.
pub fn extract_calls(values: &[DynSolValue]) -> Result<Vec<AggregateCall>, String> {
    let Some(DynSolValue::Array(calls)) = values.first() else {
        return Err("expected a single array of calls".to_owned());
    };

    calls
        .iter()
        .enumerate()
        .map(|(i, call)| {
            let DynSolValue::Tuple(fields) = call else {
                return Err(format!("call #{i} is not a tuple"));
            };
            match (fields.first(), fields.last()) {
                (Some(DynSolValue::Address(target)), Some(DynSolValue::Bytes(data))) => Ok(AggregateCall {
                    target: *target,
                    call_data: Bytes::copy_from_slice(data),
                }),
                _ => Err(format!("call #{i} has no (target, callData) fields")),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::dyn_abi::JsonAbiExt;
    use alloy::json_abi::Function;
    use alloy::primitives::U256;

    fn call3(target: Address, data: &[u8]) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Address(target),
            DynSolValue::Bool(false),
            DynSolValue::Bytes(data.to_vec()),
        ])
    }

    #[test]
    fn test_extract_aggregate3() {
        let a = Address::repeat_byte(1);
        let b = Address::repeat_byte(2);
        let values = vec![DynSolValue::Array(vec![call3(a, &[0xaa]), call3(b, &[])])];

        let calls = extract_calls(&values).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].target, a);
        assert_eq!(calls[0].call_data.as_ref(), &[0xaa]);
        assert_eq!(calls[1].target, b);
        assert!(calls[1].call_data.is_empty());
    }

    #[test]
    fn test_extract_aggregate3_value_after_decode() {
        let function =
            Function::parse("aggregate3Value((address,bool,uint256,bytes)[] calls)").unwrap();
        let target = Address::repeat_byte(7);
        let input = vec![DynSolValue::Array(vec![DynSolValue::Tuple(vec![
            DynSolValue::Address(target),
            DynSolValue::Bool(true),
            DynSolValue::Uint(U256::from(100), 256),
            DynSolValue::Bytes(vec![1, 2, 3, 4]),
        ])])];
        let calldata = function.abi_encode_input(&input).unwrap();
        let decoded = function.abi_decode_input(&calldata[4..], true).unwrap();

        let calls = extract_calls(&decoded).unwrap();
        assert_eq!(
            calls,
            vec![AggregateCall {
                target,
                call_data: Bytes::from(vec![1, 2, 3, 4]),
            }]
        );
    }

    #[test]
    fn test_empty_array() {
        let values = vec![DynSolValue::Array(vec![])];
        assert!(extract_calls(&values).unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        assert!(extract_calls(&[]).is_err());
        assert!(extract_calls(&[DynSolValue::Bool(true)]).is_err());
        assert!(extract_calls(&[DynSolValue::Array(vec![DynSolValue::Bool(true)])]).is_err());
    }
}
