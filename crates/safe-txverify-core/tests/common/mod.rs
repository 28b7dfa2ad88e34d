#![allow(dead_code)]

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{hex, Address, B256, U256};
use serde_json::json;

use safe_txverify_core::{Transaction, Verifier};

pub const MAINNET_SAFE: &str = "0x847B5c174615B1B7fDF770882256e2D3E95b9D92";
pub const SEPOLIA_SAFE: &str = "0xf64bc17485f0B4Ea5F06A96514182FC4cB561977";
pub const MULTICALL3: &str = "0xcA11bde05977b3631167028862bE2a173976CA11";
pub const MULTISEND: &str = "0xA1dabEF33b3B82c7814B6D82A79e50F4AC44102B";
pub const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const ZERO: &str = "0x0000000000000000000000000000000000000000";

/// aggregate3 with a single approveHash(0x493a...) call to 0x5a0a...
pub const MAINNET_DATA: &str = "0x82ad56cb0000000000000000000000000000000000000000000000000000000000000020000000000000000000000000000000000000000000000000000000000000000100000000000000000000000000000000000000000000000000000000000000200000000000000000000000005a0aae59d09fccbddb6c6cceb07b7279367c3d2a000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000600000000000000000000000000000000000000000000000000000000000000024d4d9bdcd493ad64b8f788ed9808c7bf527a10a017d9f263bb7889868ce18b451d685762d00000000000000000000000000000000000000000000000000000000";

/// Same shape as [`MAINNET_DATA`] approving 0x076d... on 0x1eb2...
pub const SEPOLIA_DATA: &str = "0x82ad56cb0000000000000000000000000000000000000000000000000000000000000020000000000000000000000000000000000000000000000000000000000000000100000000000000000000000000000000000000000000000000000000000000200000000000000000000000001eb2ffc903729a0f03966b917003800b145f56e2000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000600000000000000000000000000000000000000000000000000000000000000024d4d9bdcd076db0a8758739afdd098a3d9fed5147eb55f363cd85167c1b3e5f334d317f3e00000000000000000000000000000000000000000000000000000000";

pub fn verifier() -> Verifier {
    Verifier::builtin().expect("builtin registries")
}

pub fn mainnet_record() -> serde_json::Value {
    json!({
        "safe": MAINNET_SAFE,
        "safe_version": "1.3.0",
        "chain": 1,
        "to": MULTICALL3,
        "value": "0",
        "data": MAINNET_DATA,
        "operation": 1,
        "safe_tx_gas": "0",
        "base_gas": "0",
        "gas_price": "0",
        "gas_token": ZERO,
        "refund_receiver": ZERO,
        "nonce": "15"
    })
}

pub fn sepolia_record() -> serde_json::Value {
    json!({
        "safe": SEPOLIA_SAFE,
        "safe_version": "1.4.1",
        "chain": 11155111,
        "to": MULTICALL3,
        "value": 0,
        "data": SEPOLIA_DATA,
        "operation": 1,
        "safe_tx_gas": 0,
        "base_gas": 0,
        "gas_price": 0,
        "gas_token": ZERO,
        "refund_receiver": ZERO,
        "nonce": 30
    })
}

pub fn transaction(record: serde_json::Value) -> Transaction {
    serde_json::from_value(record).expect("valid transaction record")
}

pub fn mainnet_tx() -> Transaction {
    transaction(mainnet_record())
}

pub fn hash(raw: &str) -> B256 {
    raw.parse().expect("valid 32-byte hash")
}

/// ABI-encode a call to `signature` with `args`
pub fn encode_call(signature: &str, args: &[DynSolValue]) -> Vec<u8> {
    Function::parse(signature)
        .expect("valid signature")
        .abi_encode_input(args)
        .expect("encodable arguments")
}

pub fn transfer_call(to: Address, amount: u64) -> Vec<u8> {
    encode_call(
        "transfer(address to,uint256 amount)",
        &[
            DynSolValue::Address(to),
            DynSolValue::Uint(U256::from(amount), 256),
        ],
    )
}

/// One packed MultiSend record
pub fn multisend_record(operation: u8, to: Address, value: u64, data: &[u8]) -> Vec<u8> {
    let mut out = vec![operation];
    out.extend_from_slice(to.as_slice());
    out.extend_from_slice(&U256::from(value).to_be_bytes::<32>());
    out.extend_from_slice(&U256::from(data.len()).to_be_bytes::<32>());
    out.extend_from_slice(data);
    out
}

pub fn multisend_call(packed: Vec<u8>) -> Vec<u8> {
    encode_call("multiSend(bytes transactions)", &[DynSolValue::Bytes(packed)])
}

pub fn aggregate3_call(calls: &[(Address, Vec<u8>)]) -> Vec<u8> {
    let calls = calls
        .iter()
        .map(|(target, data)| {
            DynSolValue::Tuple(vec![
                DynSolValue::Address(*target),
                DynSolValue::Bool(false),
                DynSolValue::Bytes(data.clone()),
            ])
        })
        .collect();
    encode_call(
        "aggregate3((address,bool,bytes)[] calls)",
        &[DynSolValue::Array(calls)],
    )
}

pub fn hex0x(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn address(raw: &str) -> Address {
    raw.parse().expect("valid address")
}
