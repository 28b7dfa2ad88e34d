//! Verification facade

use std::sync::Arc;

use alloy::primitives::Address;
use tracing::debug;

use crate::config::VerifierConfig;
use crate::decode::CalldataDecoder;
use crate::error::Result;
use crate::hashing::{parse_address, parse_calldata, tx_hashes};
use crate::nested::Assembly;
use crate::registry::Registries;
use crate::types::{Transaction, VerificationResult, Warning};

/// Strip a chain-name prefix such as `eth:` or `oeth:` from an address
pub fn strip_chain_prefix(address: &str) -> &str {
    match address.rfind(':') {
        Some(i) => &address[i + 1..],
        None => address,
    }
}

/// Verifies transaction records against a shared set of registries
#[derive(Debug, Clone)]
pub struct Verifier {
    registries: Arc<Registries>,
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(registries: Arc<Registries>, config: VerifierConfig) -> Self {
        Self { registries, config }
    }

    /// Verifier over the built-in registries with default settings
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(
            Arc::new(Registries::builtin()?),
            VerifierConfig::default(),
        ))
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    /// Verify a transaction record, including its nested approval if any
    pub fn verify(&self, tx: Transaction) -> Result<VerificationResult> {
        let tx = normalize(tx)?;
        Assembly::from_transaction(tx).verify(|level| self.verify_level(level))
    }

    /// Parse a JSON transaction record and verify it
    pub fn verify_json(&self, record: &[u8]) -> Result<VerificationResult> {
        let tx: Transaction = serde_json::from_slice(record)?;
        self.verify(tx)
    }

    /// Hash and decode one transaction
    fn verify_level(&self, tx: Transaction) -> Result<VerificationResult> {
        let hashes = tx_hashes(&tx)?;
        debug!(
            safe = %tx.safe,
            chain = tx.chain,
            nonce = %tx.nonce,
            approval_hash = %hashes.approval_hash,
            "computed transaction hashes"
        );

        let data = parse_calldata("data", &tx.data)?;
        let decoder = CalldataDecoder::new(&self.registries, self.config.max_decode_depth);
        let call = decoder.decode(&tx.to, &data, tx.chain, tx.operation.is_delegate_call())?;
        let warnings = check_warnings(&tx)?;

        Ok(VerificationResult {
            transaction: tx,
            call,
            domain_hash: hashes.domain_hash,
            message_hash: hashes.message_hash,
            approval_hash: hashes.approval_hash,
            warnings,
            nested_result: None,
        })
    }
}

/// Strip chain prefixes and validate every address field
fn normalize(mut tx: Transaction) -> Result<Transaction> {
    tx.safe = normalize_address("safe", &tx.safe)?;
    tx.to = normalize_address("to", &tx.to)?;
    tx.gas_token = normalize_address("gas_token", &tx.gas_token)?;
    tx.refund_receiver = normalize_address("refund_receiver", &tx.refund_receiver)?;
    if let Some(nested) = tx.nested_approval.as_mut() {
        nested.safe = normalize_address("nested.safe", &nested.safe)?;
        nested.to = normalize_address("nested.to", &nested.to)?;
    }
    Ok(tx)
}

fn normalize_address(field: &'static str, raw: &str) -> Result<String> {
    let stripped = strip_chain_prefix(raw.trim()).trim();
    parse_address(field, stripped)?;
    Ok(stripped.to_owned())
}

/// Advisory flags for one transaction level
pub fn check_warnings(tx: &Transaction) -> Result<Vec<Warning>> {
    let mut warnings = Vec::new();

    if tx.operation.is_delegate_call() {
        warnings.push(Warning::DelegateCall);
    }

    if parse_address("gas_token", &tx.gas_token)? != Address::ZERO {
        warnings.push(Warning::NonZeroGasToken);
    }

    if parse_address("refund_receiver", &tx.refund_receiver)? != Address::ZERO {
        warnings.push(Warning::NonZeroRefundReceiver);
    }

    Ok(warnings)
}
