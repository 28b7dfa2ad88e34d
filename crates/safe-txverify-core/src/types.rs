//! Transaction records and verification results

use alloy::primitives::{Bytes, B256, U256};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::VerifyError;
use crate::numeric;

/// Zero address as it appears in transaction records
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Safe operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Operation {
    #[default]
    Call,
    DelegateCall,
}

impl Operation {
    pub fn as_u8(self) -> u8 {
        match self {
            Operation::Call => 0,
            Operation::DelegateCall => 1,
        }
    }

    pub fn is_delegate_call(self) -> bool {
        matches!(self, Operation::DelegateCall)
    }
}

impl TryFrom<u8> for Operation {
    type Error = VerifyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Operation::Call),
            1 => Ok(Operation::DelegateCall),
            other => Err(VerifyError::InvalidOperation(other)),
        }
    }
}

impl From<Operation> for u8 {
    fn from(op: Operation) -> Self {
        op.as_u8()
    }
}

fn zero_address() -> String {
    ZERO_ADDRESS.to_owned()
}

/// A Safe transaction record as produced by a file, QR payload or API fetch.
///
/// When `nested_approval` is set, the top-level fields describe the *inner*
/// transaction and `nested_approval` carries the outer approveHash call.
///
/// Records are read with snake_case keys and written with camelCase keys,
/// matching the rest of the verification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Transaction {
    pub safe: String,
    pub safe_version: String,
    pub chain: u64,
    pub to: String,
    #[serde(with = "numeric")]
    pub value: U256,
    #[serde(default)]
    pub data: String,
    pub operation: Operation,
    #[serde(default, with = "numeric")]
    pub safe_tx_gas: U256,
    #[serde(default, with = "numeric")]
    pub base_gas: U256,
    #[serde(default, with = "numeric")]
    pub gas_price: U256,
    #[serde(default = "zero_address")]
    pub gas_token: String,
    #[serde(default = "zero_address")]
    pub refund_receiver: String,
    #[serde(with = "numeric")]
    pub nonce: U256,
    #[serde(
        default,
        rename(serialize = "nestedApproval", deserialize = "nested"),
        skip_serializing_if = "Option::is_none"
    )]
    pub nested_approval: Option<NestedApproval>,
}

/// Fields of the outer approveHash transaction of a nested approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct NestedApproval {
    pub safe: String,
    pub safe_version: String,
    #[serde(with = "numeric")]
    pub nonce: U256,
    pub data: String,
    pub operation: Operation,
    pub to: String,
}

/// Decoded arguments in declaration order, serialized as a name -> value map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArguments(Vec<(String, serde_json::Value)>);

impl ParsedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut serde_json::Value> {
        self.0.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ParsedArguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// What a call node knows about its calldata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CallPayload {
    /// Calldata that could not be decoded, shown verbatim
    RawData(Bytes),
    /// Arguments decoded against a known function
    ParsedArguments(ParsedArguments),
}

/// One decoded call, possibly expanded into batched subcalls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallNode {
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    pub function_name: String,
    #[serde(flatten)]
    pub payload: CallPayload,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_calls: Vec<CallNode>,
    pub delegate_call: bool,
}

impl CallNode {
    pub fn raw_data(&self) -> Option<&Bytes> {
        match &self.payload {
            CallPayload::RawData(data) => Some(data),
            CallPayload::ParsedArguments(_) => None,
        }
    }

    pub fn arguments(&self) -> Option<&ParsedArguments> {
        match &self.payload {
            CallPayload::ParsedArguments(args) => Some(args),
            CallPayload::RawData(_) => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.function_name == crate::decode::UNKNOWN_FUNCTION
    }
}

/// Advisory flags raised for a verified transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Warning {
    DelegateCall,
    NonZeroGasToken,
    NonZeroRefundReceiver,
    /// Outer data of a nested approval is not an `approveHash(bytes32)` call
    NotAnApproval,
    /// Outer approveHash call is not sent to the inner transaction's Safe
    ApprovalTargetMismatch,
    /// Outer approveHash call approves a hash other than the inner approval hash
    ApprovedHashMismatch,
}

impl Warning {
    pub fn message(&self) -> &'static str {
        match self {
            Warning::DelegateCall => "DELEGATECALL - can modify Safe state!",
            Warning::NonZeroGasToken => "Non-zero gas token - gas refund paid in a token",
            Warning::NonZeroRefundReceiver => "Non-zero refund receiver - gas refund sent elsewhere",
            Warning::NotAnApproval => "Nested approval is not an approveHash(bytes32) call",
            Warning::ApprovalTargetMismatch => "approveHash is not sent to the inner transaction's Safe",
            Warning::ApprovedHashMismatch => "approveHash approves a different hash than the inner transaction",
        }
    }
}

/// Digests and decoded call tree for one transaction level
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub transaction: Transaction,
    pub call: CallNode,
    pub domain_hash: B256,
    pub message_hash: B256,
    pub approval_hash: B256,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested_result: Option<Box<VerificationResult>>,
}
