//! MultiSend packed transaction stream
//!
//! Each record is `operation (1) | to (20) | value (32) | dataLength (32) | data`.

use alloy::primitives::{Address, Bytes, U256};

use crate::constants::MULTISEND_RECORD_HEADER_LEN;
use crate::types::Operation;

/// One record of a MultiSend stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSendRecord {
    pub operation: Operation,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Records unpacked from a stream, plus how many bytes were left over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unpacked {
    pub records: Vec<MultiSendRecord>,
    pub trailing: usize,
}

/// Unpack a MultiSend `transactions` argument.
///
/// Parsing stops at the first record that does not fit in the remaining
/// bytes. An operation byte other than 0 or 1 is an error.
pub fn unpack(packed: &[u8]) -> Result<Unpacked, String> {
    let mut records = Vec::new();
    let mut offset = 0;

    while packed.len() - offset >= MULTISEND_RECORD_HEADER_LEN {
        // operation: 1 byte
        let operation = Operation::try_from(packed[offset])
            .map_err(|_| format!("record {} has operation {}", records.len(), packed[offset]))?;
        let mut cursor = offset + 1;

        // to: 20 bytes
        let to = Address::from_slice(&packed[cursor..cursor + 20]);
        cursor += 20;

        // value: 32 bytes
        let value = U256::from_be_slice(&packed[cursor..cursor + 32]);
        cursor += 32;

        // dataLength: 32 bytes
        let data_length = U256::from_be_slice(&packed[cursor..cursor + 32]);
        cursor += 32;

        let remaining = packed.len() - cursor;
        if data_length > U256::from(remaining) {
            break;
        }
        let data_length = data_length.to::<usize>();

        records.push(MultiSendRecord {
            operation,
            to,
            value,
            data: Bytes::copy_from_slice(&packed[cursor..cursor + data_length]),
        });
        offset = cursor + data_length;
    }

    Ok(Unpacked {
        records,
        trailing: packed.len() - offset,
    })
}
