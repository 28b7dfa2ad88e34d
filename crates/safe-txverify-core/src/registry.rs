//! Static registries of known contracts and functions
//!
//! Built once from a [`RegistryConfig`] and shared read-only afterwards.

use std::collections::HashMap;

use alloy::json_abi::Function;
use alloy::primitives::{Address, Selector};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, VerifyError};

/// Display information about a deployed contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInfo {
    pub name: String,
    /// Token decimals, 0 for non-token contracts
    pub decimals: u8,
}

/// Batching format understood by an allow-listed contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchKind {
    /// Safe MultiSend / MultiSendCallOnly: byte-packed records
    MultiSend,
    /// Multicall3: aggregate3 / aggregate3Value struct arrays
    Multicall3,
}

impl BatchKind {
    /// Entry points that expand into subcalls for this kind
    pub fn entry_points(self) -> &'static [Selector] {
        match self {
            BatchKind::MultiSend => &[MULTISEND_SELECTOR],
            BatchKind::Multicall3 => &[AGGREGATE3_SELECTOR, AGGREGATE3_VALUE_SELECTOR],
        }
    }

    pub fn recognizes(self, selector: Selector) -> bool {
        self.entry_points().contains(&selector)
    }
}

/// A function the decoder can resolve by selector
#[derive(Debug, Clone)]
pub struct KnownFunction {
    pub name: String,
    pub signature: String,
    pub selector: Selector,
    pub abi: Function,
}

impl KnownFunction {
    /// Parse a human-readable signature, e.g. `transfer(address to,uint256 amount)`
    pub fn parse(signature: &str) -> Result<Self> {
        let abi = Function::parse(signature).map_err(|e| VerifyError::InvalidSignature {
            signature: signature.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name: abi.name.clone(),
            signature: signature.to_owned(),
            selector: abi.selector(),
            abi,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEntry {
    pub chain: u64,
    pub address: Address,
    pub name: String,
    #[serde(default)]
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchingEntry {
    pub chain: u64,
    pub address: Address,
    pub kind: BatchKind,
}

/// Static configuration the registries are built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub contracts: Vec<ContractEntry>,
    pub batching: Vec<BatchingEntry>,
    pub functions: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let contract = |chain, address, name: &str, decimals| ContractEntry {
            chain,
            address,
            name: name.to_owned(),
            decimals,
        };
        let batching = |chain, address, kind| BatchingEntry {
            chain,
            address,
            kind,
        };

        Self {
            contracts: vec![
                contract(MAINNET_CHAIN_ID, SAFE_MULTISEND_ADDRESS, "GNOSIS SAFE MULTISEND", 0),
                contract(MAINNET_CHAIN_ID, MULTICALL3_ADDRESS, "MULTICALL3", 0),
                contract(MAINNET_CHAIN_ID, USDC_MAINNET_ADDRESS, "USDC", 6),
                contract(
                    OP_MAINNET_CHAIN_ID,
                    SAFE_MULTISEND_ADDRESS,
                    "GNOSIS SAFE MULTISEND CALL ONLY",
                    0,
                ),
                contract(
                    OP_MAINNET_CHAIN_ID,
                    SAFE_MULTISEND_CALL_ONLY_141,
                    "GNOSIS SAFE MULTISEND CALL ONLY",
                    0,
                ),
                contract(OP_MAINNET_CHAIN_ID, MULTICALL3_ADDRESS, "MULTICALL3", 0),
                contract(OP_MAINNET_CHAIN_ID, OP_TOKEN_ADDRESS, "OP TOKEN", 18),
                contract(OP_MAINNET_CHAIN_ID, SUPERFLUID_OP_ADDRESS, "SUPERFLUID OP", 18),
            ],
            batching: vec![
                batching(MAINNET_CHAIN_ID, SAFE_MULTISEND_ADDRESS, BatchKind::MultiSend),
                batching(MAINNET_CHAIN_ID, MULTICALL3_ADDRESS, BatchKind::Multicall3),
                batching(OP_MAINNET_CHAIN_ID, SAFE_MULTISEND_ADDRESS, BatchKind::MultiSend),
                batching(OP_MAINNET_CHAIN_ID, SAFE_MULTISEND_CALL_ONLY_141, BatchKind::MultiSend),
                batching(OP_MAINNET_CHAIN_ID, MULTICALL3_ADDRESS, BatchKind::Multicall3),
            ],
            functions: KNOWN_SIGNATURES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// Chain-scoped contract names, decimals and batching allow-list
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    contracts: HashMap<(u64, Address), ContractInfo>,
    batching: HashMap<(u64, Address), BatchKind>,
}

impl ContractRegistry {
    pub fn contract(&self, chain: u64, address: &Address) -> Option<&ContractInfo> {
        self.contracts.get(&(chain, *address))
    }

    pub fn name_of(&self, chain: u64, address: &Address) -> Option<&str> {
        self.contract(chain, address).map(|c| c.name.as_str())
    }

    pub fn batching_kind(&self, chain: u64, address: &Address) -> Option<BatchKind> {
        self.batching.get(&(chain, *address)).copied()
    }
}

/// Selector -> function lookup
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    by_selector: HashMap<Selector, KnownFunction>,
}

impl FunctionRegistry {
    pub fn function(&self, selector: &Selector) -> Option<&KnownFunction> {
        self.by_selector.get(selector)
    }

    pub fn len(&self) -> usize {
        self.by_selector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_selector.is_empty()
    }
}

/// Both registries, immutable once built
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub contracts: ContractRegistry,
    pub functions: FunctionRegistry,
}

impl Registries {
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let contracts = config
            .contracts
            .iter()
            .map(|entry| {
                (
                    (entry.chain, entry.address),
                    ContractInfo {
                        name: entry.name.clone(),
                        decimals: entry.decimals,
                    },
                )
            })
            .collect();

        let batching = config
            .batching
            .iter()
            .map(|entry| ((entry.chain, entry.address), entry.kind))
            .collect();

        let mut by_selector = HashMap::with_capacity(config.functions.len());
        for signature in &config.functions {
            let function = KnownFunction::parse(signature)?;
            tracing::debug!(
                selector = %function.selector,
                signature = %function.signature,
                "registered function"
            );
            by_selector.insert(function.selector, function);
        }

        Ok(Self {
            contracts: ContractRegistry {
                contracts,
                batching,
            },
            functions: FunctionRegistry { by_selector },
        })
    }

    /// Registries for the built-in contract and function tables
    pub fn builtin() -> Result<Self> {
        Self::from_config(&RegistryConfig::default())
    }
}
