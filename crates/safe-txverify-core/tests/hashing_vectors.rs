mod common;

use alloy::primitives::{keccak256, U256};
use safe_txverify_core::hashing::{domain_hash_with, parse_calldata};
use safe_txverify_core::{
    approval_hash, domain_hash, message_hash, tx_hashes, HashScheme, Operation, Transaction,
    VerifyError,
};

use common::*;

#[test]
fn domain_hashes_match_reference_vectors() {
    let cases = [
        (
            MAINNET_SAFE,
            1,
            "0xa4a9c312badf3fcaa05eafe5dc9bee8bd9316c78ee8b0bebe3115bb21b732672",
        ),
        (
            "0xE2Ed962948005AB01F2cEfE8326a0730B7D268af",
            10,
            "0x2d170d0f028e39b4926fa91cf7bbb44ef0e203f3995905ec6f1bdd3c657edfb3",
        ),
        (
            "0x2501c477D0A35545a387Aa4A3EEe4292A9a8B3F0",
            10,
            "0xb34978142f4478f3e5633915597a756daa58a1a59a3e0234f9acd5444f1ca70e",
        ),
        (
            SEPOLIA_SAFE,
            11155111,
            "0xbe081970e9fc104bd1ea27e375cd21ec7bb1eec56bfe43347c3e36c5d27b8533",
        ),
    ];

    let scheme = HashScheme::parse("1.3.0").expect("valid version");
    for (safe, chain, expected) in cases {
        assert_eq!(
            domain_hash_with(scheme, chain, address(safe)),
            hash(expected),
            "domain hash of {safe} on chain {chain}"
        );
    }
}

#[test]
fn mainnet_transaction_hashes() {
    let hashes = tx_hashes(&mainnet_tx()).expect("hashes");
    assert_eq!(
        hashes.domain_hash,
        hash("0xa4a9c312badf3fcaa05eafe5dc9bee8bd9316c78ee8b0bebe3115bb21b732672")
    );
    assert_eq!(
        hashes.message_hash,
        hash("0xa6d60aba6b1426cec097593348a9d36ed42ddd1ac52f1b05a5f46a9c0401a11a")
    );
    assert_eq!(
        hashes.approval_hash,
        hash("0x35004412c6a0f133f101f892afde6fb164d75a62c0627fa3824272ca2bad9346")
    );
}

#[test]
fn sepolia_transaction_hashes() {
    let tx = transaction(sepolia_record());
    assert_eq!(
        message_hash(&tx).expect("message hash"),
        hash("0x2044f4436f0a27ce0697bc3fadb46ee88568d74fe8abaf1a6a31ce5ecf888c5a")
    );
    assert_eq!(
        approval_hash(&tx).expect("approval hash"),
        hash("0x0a9321a7dc6bc12a6c64e288f2af84af7bd022cc179e0ed3c7f5d9447cf674e0")
    );
}

#[test]
fn empty_data_hashes_as_keccak_of_nothing() {
    let mut tx = mainnet_tx();
    tx.to = "0x000000000000000000000000000000000000CAFE".to_owned();
    tx.value = U256::from(10u64).pow(U256::from(18));
    tx.data = "0x".to_owned();
    tx.operation = Operation::Call;
    tx.nonce = U256::ZERO;

    assert_eq!(
        keccak256(parse_calldata("data", &tx.data).unwrap()),
        hash("0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
    );
    assert_eq!(
        message_hash(&tx).expect("message hash"),
        hash("0x716a541962f5bd529a1234c3bc7f848ca1b13182034761908fffe8cfb98f8599")
    );

    tx.data = String::new();
    assert_eq!(
        message_hash(&tx).expect("message hash"),
        hash("0x716a541962f5bd529a1234c3bc7f848ca1b13182034761908fffe8cfb98f8599")
    );
}

#[test]
fn domain_version_boundary_at_1_2_0() {
    let mut tx = mainnet_tx();
    let legacy_domain = hash("0x6baa187370d753f2ae5a038e3e8b7db9a9973fcd5327fc2cf802823a3efa65b6");

    tx.safe_version = "1.2.0".to_owned();
    assert_eq!(domain_hash(&tx).unwrap(), legacy_domain);
    assert_eq!(
        approval_hash(&tx).unwrap(),
        hash("0x69df724d161b6ead8c40426f3d9ab6d5adf6eea7887812cff13da0f815fa3d76")
    );

    tx.safe_version = "1.2.1".to_owned();
    assert_eq!(
        domain_hash(&tx).unwrap(),
        hash("0xa4a9c312badf3fcaa05eafe5dc9bee8bd9316c78ee8b0bebe3115bb21b732672")
    );
}

#[test]
fn message_version_boundary_at_1_0_0() {
    let mut tx = mainnet_tx();
    let current = hash("0xa6d60aba6b1426cec097593348a9d36ed42ddd1ac52f1b05a5f46a9c0401a11a");

    tx.safe_version = "1.0.0".to_owned();
    assert_eq!(message_hash(&tx).unwrap(), current);

    tx.safe_version = "0.9.9".to_owned();
    assert_eq!(
        message_hash(&tx).unwrap(),
        hash("0xf719705cbb02fd8d9d62684e8bb48c2be82546f3388d78be91a95e5d3080ee51")
    );
    assert_eq!(
        approval_hash(&tx).unwrap(),
        hash("0x1f23b750c5c87e574d8c44bf02c565655dcb9a1ef029a0cbcd3fb5995823e3eb")
    );
}

const OTHER: &str = "0x000000000000000000000000000000000000dEaD";

#[test]
fn changing_any_field_changes_the_message_hash() {
    let base = mainnet_tx();
    let reference = message_hash(&base).unwrap();

    let mutations: [(&str, fn(&mut Transaction)); 10] = [
        ("to", |tx| tx.to = OTHER.to_owned()),
        ("value", |tx| tx.value = U256::from(1)),
        ("data", |tx| tx.data = "0x00".to_owned()),
        ("operation", |tx| tx.operation = Operation::Call),
        ("safe_tx_gas", |tx| tx.safe_tx_gas = U256::from(1)),
        ("base_gas", |tx| tx.base_gas = U256::from(1)),
        ("gas_price", |tx| tx.gas_price = U256::from(1)),
        ("gas_token", |tx| tx.gas_token = OTHER.to_owned()),
        ("refund_receiver", |tx| tx.refund_receiver = OTHER.to_owned()),
        ("nonce", |tx| tx.nonce = U256::from(16)),
    ];

    let mut seen = vec![reference];
    for (field, mutate) in mutations {
        let mut tx = base.clone();
        mutate(&mut tx);
        let hash = message_hash(&tx).unwrap();
        assert!(!seen.contains(&hash), "changing {field} did not produce a new hash");
        seen.push(hash);
    }
}

#[test]
fn chain_and_safe_only_affect_the_domain() {
    let base = mainnet_tx();
    let mut moved = base.clone();
    moved.chain = 10;
    moved.safe = "0xE2Ed962948005AB01F2cEfE8326a0730B7D268af".to_owned();

    assert_eq!(message_hash(&base).unwrap(), message_hash(&moved).unwrap());
    assert_ne!(domain_hash(&base).unwrap(), domain_hash(&moved).unwrap());
    assert_ne!(approval_hash(&base).unwrap(), approval_hash(&moved).unwrap());
}

#[test]
fn unparseable_version_fails_every_hash() {
    let mut tx = mainnet_tx();
    tx.safe_version = "one point three".to_owned();

    assert!(matches!(domain_hash(&tx), Err(VerifyError::InvalidSafeVersion { .. })));
    assert!(matches!(message_hash(&tx), Err(VerifyError::InvalidSafeVersion { .. })));
    assert!(matches!(approval_hash(&tx), Err(VerifyError::InvalidSafeVersion { .. })));
}

#[test]
fn odd_length_data_is_rejected() {
    let mut tx = mainnet_tx();
    tx.data = "0xabc".to_owned();
    assert!(matches!(message_hash(&tx), Err(VerifyError::InvalidHex { .. })));
}
