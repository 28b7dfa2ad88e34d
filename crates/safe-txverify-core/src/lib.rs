pub mod config;
pub mod constants;
pub mod decode;
pub mod error;
pub mod hashing;
pub mod nested;
pub mod numeric;
pub mod registry;
pub mod types;
pub mod verify;

pub use config::VerifierConfig;
pub use decode::{CalldataDecoder, UNKNOWN_FUNCTION};
pub use error::{Level, Result, VerifyError};
pub use hashing::{approval_hash, domain_hash, message_hash, tx_hashes, HashScheme, TxHashes};
pub use nested::Assembly;
pub use registry::{BatchKind, ContractInfo, KnownFunction, Registries, RegistryConfig};
pub use types::{
    CallNode, CallPayload, NestedApproval, Operation, ParsedArguments, Transaction,
    VerificationResult, Warning,
};
pub use verify::{strip_chain_prefix, Verifier};
