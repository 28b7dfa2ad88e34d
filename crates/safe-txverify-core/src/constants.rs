//! Protocol constants and well-known deployments

use alloy::primitives::{address, b256, fixed_bytes, Address, Selector, B256};

// EIP-712 typehashes

/// keccak256("EIP712Domain(uint256 chainId,address verifyingContract)")
pub const DOMAIN_SEPARATOR_TYPEHASH: B256 =
    b256!("0x47e79534a245952e8b16893a336b85a3d9ea9fa8c573f3d803afb92a79469218");

/// keccak256("EIP712Domain(address verifyingContract)"), Safe <= 1.2.0
pub const LEGACY_DOMAIN_SEPARATOR_TYPEHASH: B256 =
    b256!("0x035aff83d86937d35b32e04f0ddc6ff469290eef2f1b692d8a815c89404d4749");

/// keccak256("SafeTx(address to,uint256 value,bytes data,uint8 operation,uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,address refundReceiver,uint256 nonce)")
pub const SAFE_TX_TYPEHASH: B256 =
    b256!("0xbb8310d486368db6bd6f849402fdd73ad53d316b5a4b2644ad6efe0f941286d8");

/// Same as [`SAFE_TX_TYPEHASH`] with `dataGas` in place of `baseGas`, Safe < 1.0.0
pub const LEGACY_SAFE_TX_TYPEHASH: B256 =
    b256!("0x14d461bc7412367e924637b363c7bf29b8f47e2f84869f4426e5633d8af47b20");

/// EIP-712 prefix for the final signing digest
pub const EIP712_PREFIX: [u8; 2] = [0x19, 0x01];

// Selectors

/// approveHash(bytes32)
pub const APPROVE_HASH_SELECTOR: Selector = fixed_bytes!("d4d9bdcd");

/// multiSend(bytes)
pub const MULTISEND_SELECTOR: Selector = fixed_bytes!("8d80ff0a");

/// aggregate3((address,bool,bytes)[])
pub const AGGREGATE3_SELECTOR: Selector = fixed_bytes!("82ad56cb");

/// aggregate3Value((address,bool,uint256,bytes)[])
pub const AGGREGATE3_VALUE_SELECTOR: Selector = fixed_bytes!("174dea71");

/// operation (1) + to (20) + value (32) + data length (32)
pub const MULTISEND_RECORD_HEADER_LEN: usize = 1 + 20 + 32 + 32;

/// Default bound on nested batch expansion
pub const DEFAULT_MAX_DECODE_DEPTH: usize = 16;

/// Token functions whose `amount` argument is rescaled by the token decimals
pub const TOKEN_FUNCTIONS: &[&str] = &[
    "transfer",
    "transferFrom",
    "approve",
    "increaseAllowance",
    "decreaseAllowance",
];

// Chains

pub const MAINNET_CHAIN_ID: u64 = 1;
pub const OP_MAINNET_CHAIN_ID: u64 = 10;

// Deployments

pub const SAFE_MULTISEND_ADDRESS: Address = address!("0xA1dabEF33b3B82c7814B6D82A79e50F4AC44102B");
pub const SAFE_MULTISEND_CALL_ONLY_141: Address =
    address!("0x9641d764fc13c8B624c04430C7356C1C7C8102e2");
pub const MULTICALL3_ADDRESS: Address = address!("0xcA11bde05977b3631167028862bE2a173976CA11");
pub const USDC_MAINNET_ADDRESS: Address = address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
pub const OP_TOKEN_ADDRESS: Address = address!("0x4200000000000000000000000000000000000042");
pub const SUPERFLUID_OP_ADDRESS: Address = address!("0x1828Bff08BD244F7990edDCd9B19cc654b33cDB4");

/// Known function signatures, with parameter names used as argument keys
pub const KNOWN_SIGNATURES: &[&str] = &[
    "transfer(address to,uint256 amount)",
    "transferFrom(address from,address to,uint256 amount)",
    "approve(address spender,uint256 amount)",
    "increaseAllowance(address spender,uint256 amount)",
    "decreaseAllowance(address spender,uint256 amount)",
    "approveHash(bytes32 hashToApprove)",
    "aggregate3((address,bool,bytes)[] calls)",
    "aggregate3Value((address,bool,uint256,bytes)[] calls)",
    "multiSend(bytes transactions)",
    "callAgreement(address agreementClass,bytes callData,bytes userData)",
    "createVestingScheduleFromAmountAndDuration(address superToken,address receiver,uint256 totalAmount,uint32 totalDuration,uint32 startDate,uint32 cliffPeriod,uint32 claimPeriod)",
];
