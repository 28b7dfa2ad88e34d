//! EIP-712 hash computation for Safe transactions
//!
//! The encoding depends on the Safe contract version:
//!
//! | version         | domain separator        | SafeTx typehash     |
//! |-----------------|-------------------------|---------------------|
//! | < 1.0.0         | (typehash, safe)        | legacy (`dataGas`)  |
//! | 1.0.0 ..= 1.2.0 | (typehash, safe)        | current (`baseGas`) |
//! | > 1.2.0         | (typehash, chain, safe) | current (`baseGas`) |

use std::str::FromStr;

use alloy::primitives::{keccak256, Address, B256, U256};
use alloy::sol_types::SolValue;
use semver::{BuildMetadata, Version};

use crate::constants::*;
use crate::error::{Result, VerifyError};
use crate::types::Transaction;

/// Domain separator encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainLayout {
    /// `(bytes32 typehash, address safe)`, no chain id
    Legacy,
    /// `(bytes32 typehash, uint256 chainId, address safe)`
    WithChainId,
}

/// SafeTx struct typehash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeTxLayout {
    /// Pre-1.0.0 typehash naming the refund overhead `dataGas`
    Legacy,
    /// Typehash naming it `baseGas`
    Current,
}

/// Hashing strategy selected from a Safe version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashScheme {
    pub domain: DomainLayout,
    pub safe_tx: SafeTxLayout,
}

impl HashScheme {
    pub fn for_version(version: &Version) -> Self {
        let domain = if *version <= Version::new(1, 2, 0) {
            DomainLayout::Legacy
        } else {
            DomainLayout::WithChainId
        };
        let safe_tx = if *version < Version::new(1, 0, 0) {
            SafeTxLayout::Legacy
        } else {
            SafeTxLayout::Current
        };
        Self { domain, safe_tx }
    }

    /// Parse a Safe version string and select its scheme
    pub fn parse(version: &str) -> Result<Self> {
        parse_safe_version(version).map(|v| Self::for_version(&v))
    }

    pub fn domain_typehash(&self) -> B256 {
        match self.domain {
            DomainLayout::Legacy => LEGACY_DOMAIN_SEPARATOR_TYPEHASH,
            DomainLayout::WithChainId => DOMAIN_SEPARATOR_TYPEHASH,
        }
    }

    pub fn safe_tx_typehash(&self) -> B256 {
        match self.safe_tx {
            SafeTxLayout::Legacy => LEGACY_SAFE_TX_TYPEHASH,
            SafeTxLayout::Current => SAFE_TX_TYPEHASH,
        }
    }
}

/// Parse a Safe version, ignoring build metadata such as `+L2`
pub fn parse_safe_version(raw: &str) -> Result<Version> {
    let mut version = Version::parse(raw.trim()).map_err(|e| VerifyError::InvalidSafeVersion {
        value: raw.to_owned(),
        reason: e.to_string(),
    })?;
    version.build = BuildMetadata::EMPTY;
    Ok(version)
}

/// The three digests for one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxHashes {
    pub domain_hash: B256,
    pub message_hash: B256,
    pub approval_hash: B256,
}

/// Parse an address field, accepting any casing
pub fn parse_address(field: &'static str, raw: &str) -> Result<Address> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(VerifyError::InvalidAddress {
            field,
            value: raw.to_owned(),
        });
    }
    Address::from_str(trimmed).map_err(|_| VerifyError::InvalidAddress {
        field,
        value: raw.to_owned(),
    })
}

/// Decode `0x`-prefixed (or bare) hex calldata; empty input is empty calldata
pub fn parse_calldata(field: &'static str, raw: &str) -> Result<Vec<u8>> {
    let trimmed = raw.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if hex_part.len() % 2 != 0 {
        return Err(VerifyError::InvalidHex {
            field,
            reason: format!("odd number of hex digits ({})", hex_part.len()),
        });
    }
    alloy::primitives::hex::decode(hex_part).map_err(|e| VerifyError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

/// EIP-712 domain separator of the transaction's Safe
pub fn domain_hash(tx: &Transaction) -> Result<B256> {
    let scheme = HashScheme::parse(&tx.safe_version)?;
    let safe = parse_address("safe", &tx.safe)?;
    Ok(domain_hash_with(scheme, tx.chain, safe))
}

pub fn domain_hash_with(scheme: HashScheme, chain: u64, safe: Address) -> B256 {
    let encoded = match scheme.domain {
        DomainLayout::Legacy => (scheme.domain_typehash(), safe).abi_encode(),
        DomainLayout::WithChainId => {
            (scheme.domain_typehash(), U256::from(chain), safe).abi_encode()
        }
    };
    keccak256(encoded)
}

/// EIP-712 struct hash of the SafeTx message
pub fn message_hash(tx: &Transaction) -> Result<B256> {
    let scheme = HashScheme::parse(&tx.safe_version)?;
    let to = parse_address("to", &tx.to)?;
    let data = parse_calldata("data", &tx.data)?;
    let gas_token = parse_address("gas_token", &tx.gas_token)?;
    let refund_receiver = parse_address("refund_receiver", &tx.refund_receiver)?;

    let encoded = (
        scheme.safe_tx_typehash(),
        to,
        tx.value,
        keccak256(&data),
        U256::from(tx.operation.as_u8()),
        tx.safe_tx_gas,
        tx.base_gas,
        tx.gas_price,
        gas_token,
        refund_receiver,
        tx.nonce,
    )
        .abi_encode();
    Ok(keccak256(encoded))
}

/// `keccak256(0x1901 || domainHash || messageHash)`
pub fn approval_hash(tx: &Transaction) -> Result<B256> {
    Ok(combine(domain_hash(tx)?, message_hash(tx)?))
}

/// Final signing digest from its two parts
pub fn combine(domain_hash: B256, message_hash: B256) -> B256 {
    let mut preimage = Vec::with_capacity(2 + 32 + 32);
    preimage.extend_from_slice(&EIP712_PREFIX);
    preimage.extend_from_slice(domain_hash.as_slice());
    preimage.extend_from_slice(message_hash.as_slice());
    keccak256(preimage)
}

/// All three digests at once
pub fn tx_hashes(tx: &Transaction) -> Result<TxHashes> {
    let domain_hash = domain_hash(tx)?;
    let message_hash = message_hash(tx)?;
    Ok(TxHashes {
        domain_hash,
        message_hash,
        approval_hash: combine(domain_hash, message_hash),
    })
}
