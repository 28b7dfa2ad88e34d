//! Two-level nested approval assembly
//!
//! A record with a `nested` section describes two transactions: its top-level
//! fields are the *inner* transaction, and `nested` holds the *outer*
//! `approveHash(bytes32)` call that approves the inner one from another Safe.
//! Both levels are verified and the outer result carries the inner one.

use alloy::primitives::{B256, U256};
use tracing::{debug, warn};

use crate::constants::APPROVE_HASH_SELECTOR;
use crate::error::{Level, Result};
use crate::hashing::{parse_address, parse_calldata};
use crate::types::{NestedApproval, Transaction, VerificationResult, Warning};

/// Length of `approveHash(bytes32)` calldata
const APPROVE_HASH_CALLDATA_LEN: usize = 4 + 32;

/// What a transaction record asks to be verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembly {
    /// A single transaction
    Flat(Transaction),
    /// An outer approveHash transaction and the inner transaction it approves
    Wrapped { inner: Transaction, outer: Transaction },
}

impl Assembly {
    pub fn from_transaction(tx: Transaction) -> Self {
        match tx.nested_approval.clone() {
            None => Assembly::Flat(tx),
            Some(nested) => {
                let mut inner = tx;
                inner.nested_approval = None;
                let outer = outer_transaction(&inner, nested);
                Assembly::Wrapped { inner, outer }
            }
        }
    }

    /// Run `verify_level` on each transaction and link the results.
    ///
    /// Disagreements between the two levels never fail verification; they
    /// are reported as warnings on the outer result.
    pub fn verify<F>(self, verify_level: F) -> Result<VerificationResult>
    where
        F: Fn(Transaction) -> Result<VerificationResult>,
    {
        match self {
            Assembly::Flat(tx) => verify_level(tx),
            Assembly::Wrapped { inner, outer } => {
                let inner_result = verify_level(inner).map_err(|e| e.at_level(Level::Inner))?;
                let mut outer_result = verify_level(outer).map_err(|e| e.at_level(Level::Outer))?;

                outer_result
                    .warnings
                    .extend(reconcile(&outer_result.transaction, &inner_result));
                debug!(
                    outer = %outer_result.approval_hash,
                    inner = %inner_result.approval_hash,
                    "assembled nested approval"
                );
                outer_result.nested_result = Some(Box::new(inner_result));
                Ok(outer_result)
            }
        }
    }
}

/// The outer transaction: the inner one with the approveHash call's fields
/// substituted and no ETH value
fn outer_transaction(inner: &Transaction, nested: NestedApproval) -> Transaction {
    Transaction {
        safe: nested.safe,
        safe_version: nested.safe_version,
        to: nested.to,
        value: U256::ZERO,
        data: nested.data,
        operation: nested.operation,
        nonce: nested.nonce,
        nested_approval: None,
        ..inner.clone()
    }
}

/// Where the outer transaction does not approve exactly the inner one
fn reconcile(outer: &Transaction, inner: &VerificationResult) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let approved = parse_calldata("nested.data", &outer.data)
        .ok()
        .filter(|data| {
            data.len() == APPROVE_HASH_CALLDATA_LEN && data[..4] == APPROVE_HASH_SELECTOR[..]
        })
        .map(|data| B256::from_slice(&data[4..]));

    let outer_to = parse_address("nested.to", &outer.to).ok();
    let inner_safe = parse_address("safe", &inner.transaction.safe).ok();
    if outer_to.is_none() || outer_to != inner_safe {
        warn!(outer_to = %outer.to, inner_safe = %inner.transaction.safe, "approveHash sent to another Safe");
        warnings.push(Warning::ApprovalTargetMismatch);
    }

    match approved {
        None => {
            warn!(data = %outer.data, "nested approval data is not an approveHash(bytes32) call");
            warnings.push(Warning::NotAnApproval);
        }
        Some(approved) if approved != inner.approval_hash => {
            warn!(%approved, expected = %inner.approval_hash, "approveHash approves a different hash");
            warnings.push(Warning::ApprovedHashMismatch);
        }
        Some(_) => {}
    }
    warnings
}
