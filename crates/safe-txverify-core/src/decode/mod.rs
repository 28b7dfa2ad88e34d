//! Allow-listed calldata decoding
//!
//! Resolves the function behind a calldata blob from the function registry,
//! annotates known addresses and token amounts, and expands MultiSend and
//! Multicall3 batches into subcalls.
//!
//! Unknown targets and selectors are never errors; they decode to an
//! `"unknown"` node carrying the raw bytes. Allow-listed batching contracts
//! fail closed: a call the decoder cannot fully expand aborts the decode.

pub mod aggregate;
pub mod amount;
pub mod multisend;
pub mod parser;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes};
use tracing::{debug, warn};

use crate::constants::TOKEN_FUNCTIONS;
use crate::error::{Result, VerifyError};
use crate::hashing::parse_address;
use crate::registry::{BatchKind, Registries};
use crate::types::{CallNode, CallPayload};

pub use amount::format_token_amount;

/// Function name of calls that could not be resolved
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Recursive calldata decoder over a set of registries
#[derive(Debug, Clone, Copy)]
pub struct CalldataDecoder<'a> {
    registries: &'a Registries,
    max_depth: usize,
}

impl<'a> CalldataDecoder<'a> {
    pub fn new(registries: &'a Registries, max_depth: usize) -> Self {
        Self {
            registries,
            max_depth,
        }
    }

    /// Decode a top-level call. `target` keeps its casing for display.
    pub fn decode(
        &self,
        target: &str,
        calldata: &[u8],
        chain: u64,
        delegate_call: bool,
    ) -> Result<CallNode> {
        let address = parse_address("to", target)?;
        self.decode_at(target.to_owned(), address, calldata, chain, delegate_call, 0)
    }

    fn decode_at(
        &self,
        display: String,
        target: Address,
        calldata: &[u8],
        chain: u64,
        delegate_call: bool,
        depth: usize,
    ) -> Result<CallNode> {
        if depth > self.max_depth {
            return Err(VerifyError::DepthExceeded {
                max: self.max_depth,
                target,
            });
        }

        let contracts = &self.registries.contracts;
        let target_name = contracts.name_of(chain, &target).map(str::to_owned);
        let node = |function_name: &str, payload| CallNode {
            target: display.clone(),
            target_name: target_name.clone(),
            function_name: function_name.to_owned(),
            payload,
            sub_calls: Vec::new(),
            delegate_call,
        };
        let raw = || CallPayload::RawData(Bytes::copy_from_slice(calldata));

        let Some(selector) = parser::get_selector(calldata) else {
            debug!(%target, len = calldata.len(), "no selector, raw data");
            return Ok(node(UNKNOWN_FUNCTION, raw()));
        };

        let batch_kind = contracts.batching_kind(chain, &target);
        if let Some(kind) = batch_kind {
            if !kind.recognizes(selector) {
                return Err(VerifyError::UnsupportedBatchFunction {
                    chain,
                    target,
                    selector,
                });
            }
        }

        let Some(function) = self.registries.functions.function(&selector) else {
            if let Some(kind) = batch_kind {
                return Err(VerifyError::MalformedBatch {
                    target,
                    format: format_name(kind),
                    reason: format!("entry point {selector} is not in the function registry"),
                });
            }
            debug!(%target, %selector, "unknown selector");
            return Ok(node(UNKNOWN_FUNCTION, raw()));
        };
        debug!(%target, %selector, function = %function.name, depth, "resolved function");

        let values = match parser::decode_arguments(&function.abi, calldata) {
            Ok(values) => values,
            Err(e) => {
                if let Some(kind) = batch_kind {
                    return Err(VerifyError::MalformedBatch {
                        target,
                        format: format_name(kind),
                        reason: e.to_string(),
                    });
                }
                warn!(%target, function = %function.name, error = %e, "arguments do not decode, showing raw data");
                return Ok(node(function.name.as_str(), raw()));
            }
        };

        let mut args = parser::render_arguments(&function.abi, &values, |address| {
            contracts.name_of(chain, address).map(str::to_owned)
        });
        if TOKEN_FUNCTIONS.contains(&function.name.as_str()) {
            if let Some(info) = contracts.contract(chain, &target).filter(|c| c.decimals > 0) {
                parser::rescale_amount(&mut args, &values, &function.abi, info.decimals);
            }
        }

        let mut call = node(function.name.as_str(), CallPayload::ParsedArguments(args));
        if let Some(kind) = batch_kind {
            call.sub_calls = match kind {
                BatchKind::MultiSend => self.expand_multisend(target, &values, chain, depth)?,
                BatchKind::Multicall3 => self.expand_aggregate(target, &values, chain, depth)?,
            };
            debug!(%target, count = call.sub_calls.len(), depth, "expanded batch");
        }
        Ok(call)
    }

    fn expand_multisend(
        &self,
        target: Address,
        values: &[DynSolValue],
        chain: u64,
        depth: usize,
    ) -> Result<Vec<CallNode>> {
        let malformed = |reason: String| VerifyError::MalformedBatch {
            target,
            format: format_name(BatchKind::MultiSend),
            reason,
        };
        let Some(DynSolValue::Bytes(packed)) = values.first() else {
            return Err(malformed("expected a single bytes argument".to_owned()));
        };

        let unpacked = multisend::unpack(packed).map_err(malformed)?;
        if unpacked.trailing > 0 {
            warn!(
                %target,
                trailing = unpacked.trailing,
                records = unpacked.records.len(),
                "ignoring trailing bytes after last complete multiSend record"
            );
        }

        unpacked
            .records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                self.decode_at(
                    record.to.to_string(),
                    record.to,
                    &record.data,
                    chain,
                    record.operation.is_delegate_call(),
                    depth + 1,
                )
                .map_err(|e| subcall_error(target, index, e))
            })
            .collect()
    }

    fn expand_aggregate(
        &self,
        target: Address,
        values: &[DynSolValue],
        chain: u64,
        depth: usize,
    ) -> Result<Vec<CallNode>> {
        let calls = aggregate::extract_calls(values).map_err(|reason| VerifyError::MalformedBatch {
            target,
            format: format_name(BatchKind::Multicall3),
            reason,
        })?;

        calls
            .into_iter()
            .enumerate()
            .map(|(index, call)| {
                self.decode_at(
                    call.target.to_string(),
                    call.target,
                    &call.call_data,
                    chain,
                    false,
                    depth + 1,
                )
                .map_err(|e| subcall_error(target, index, e))
            })
            .collect()
    }
}

fn format_name(kind: BatchKind) -> &'static str {
    match kind {
        BatchKind::MultiSend => "multiSend",
        BatchKind::Multicall3 => "multicall3",
    }
}

fn subcall_error(target: Address, index: usize, source: VerifyError) -> VerifyError {
    VerifyError::SubCall {
        target,
        index,
        source: Box::new(source),
    }
}
