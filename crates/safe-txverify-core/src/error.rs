//! Error taxonomy for the verification pipeline

use std::fmt;

use alloy::primitives::{Address, Selector};
use thiserror::Error;

/// Result type alias for verification operations
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Which transaction of a nested approval an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// The approveHash transaction being signed now
    Outer,
    /// The transaction approved by the outer one
    Inner,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Outer => f.write_str("outer"),
            Level::Inner => f.write_str("inner"),
        }
    }
}

/// Errors that abort verification of a transaction
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The transaction record is not valid JSON or has malformed fields
    #[error("invalid transaction record: {0}")]
    Record(#[from] serde_json::Error),

    /// An address field is not 20 bytes of hex
    #[error("invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    /// A hex byte string could not be decoded
    #[error("invalid hex in {field}: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    /// Operation is neither Call (0) nor DelegateCall (1)
    #[error("invalid operation {0}, expected 0 (Call) or 1 (DelegateCall)")]
    InvalidOperation(u8),

    /// The Safe version string is not a semantic version
    #[error("invalid safe version '{value}': {reason}")]
    InvalidSafeVersion { value: String, reason: String },

    /// A registry function signature could not be parsed
    #[error("invalid function signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },

    /// An allow-listed batching contract was called with a function it does not batch through
    #[error("batching contract {target} on chain {chain} called with unsupported function {selector}")]
    UnsupportedBatchFunction {
        chain: u64,
        target: Address,
        selector: Selector,
    },

    /// A recognised batching call could not be expanded
    #[error("malformed {format} batch at {target}: {reason}")]
    MalformedBatch {
        target: Address,
        format: &'static str,
        reason: String,
    },

    /// Batches nest deeper than the configured limit
    #[error("call at {target} exceeds maximum batch nesting depth of {max}")]
    DepthExceeded { max: usize, target: Address },

    /// A subcall inside a batch failed to decode
    #[error("subcall #{index} of {target}: {source}")]
    SubCall {
        target: Address,
        index: usize,
        #[source]
        source: Box<VerifyError>,
    },

    /// Verification of one level of a nested approval failed
    #[error("{level} transaction: {source}")]
    Level {
        level: Level,
        #[source]
        source: Box<VerifyError>,
    },

}

impl VerifyError {
    pub(crate) fn at_level(self, level: Level) -> Self {
        VerifyError::Level {
            level,
            source: Box::new(self),
        }
    }
}
