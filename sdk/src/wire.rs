//! # Wire Codec
//!
//! Serializes lists of transactions and batches into the byte blobs the
//! ledger network accepts, and parses them back.
//!
//! A list is encoded as a `TransactionList` / `BatchList` protobuf message:
//! one repeated field (tag 1), which on the wire is simply each item as an
//! independently length-delimited message, back to back. The protobuf
//! message types are private to this module; [`Transaction`] and [`Batch`]
//! themselves carry no codec. Serializing the same list always yields the
//! same bytes; there are no maps anywhere in the schema.
//!
//! Parsing is all-or-nothing and accepts exactly what serialization emits.
//! The whole call fails, with no partial list, when:
//!
//! - the framing is broken (truncation, bad length prefix, wrong wire type);
//! - the input is not byte-for-byte the canonical encoding of what it
//!   decodes to (unknown fields, reordered fields);
//! - a header doesn't decode against its schema;
//! - a header's `signer_public_key` is not 66 lowercase hex characters, or a
//!   transaction header's `payload_sha512` is not 128;
//! - a `header_signature` is not 128 lowercase hex characters.
//!
//! Parsing does no curve math. Whether signatures verify is
//! [`crate::transaction::verify_batch`]'s job.

use bytes::Bytes;
use prost::Message;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{PUBLIC_KEY_HEX_LENGTH, SHA512_HEX_LENGTH, SIGNATURE_HEX_LENGTH};
use crate::crypto::encoding::{decode, Encoding};
use crate::transaction::header::{BatchHeader, TransactionHeader};
use crate::transaction::types::{Batch, Transaction};

/// Wire bytes that don't decode against the schema.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Truncation, bad varints or length prefixes, wrong wire types,
    /// invalid UTF-8 in string fields.
    #[error("malformed wire data: {0}")]
    Malformed(#[from] prost::DecodeError),

    /// The protobuf framing was fine but a field's content is not.
    #[error("{item} #{index}: invalid {field}: {reason}")]
    InvalidField {
        item: &'static str,
        index: usize,
        field: String,
        reason: String,
    },

    /// The input decodes, but re-serializing the result would not reproduce
    /// it. `offset` is the first byte where the two differ.
    #[error("non-canonical encoding: differs from canonical form at byte {offset}")]
    NonCanonical { offset: usize },
}

// ---------------------------------------------------------------------------
// Protobuf schema
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, Message)]
struct TransactionMessage {
    #[prost(bytes = "bytes", tag = "1")]
    header: Bytes,

    #[prost(string, tag = "2")]
    header_signature: String,

    #[prost(bytes = "bytes", tag = "3")]
    payload: Bytes,
}

#[derive(Clone, PartialEq, Message)]
struct BatchMessage {
    #[prost(bytes = "bytes", tag = "1")]
    header: Bytes,

    #[prost(string, tag = "2")]
    header_signature: String,

    #[prost(message, repeated, tag = "3")]
    transactions: Vec<TransactionMessage>,
}

#[derive(Clone, PartialEq, Message)]
struct TransactionList {
    #[prost(message, repeated, tag = "1")]
    transactions: Vec<TransactionMessage>,
}

#[derive(Clone, PartialEq, Message)]
struct BatchList {
    #[prost(message, repeated, tag = "1")]
    batches: Vec<BatchMessage>,
}

impl From<&Transaction> for TransactionMessage {
    fn from(tx: &Transaction) -> Self {
        let (header, header_signature, payload) = tx.parts();
        Self {
            header: header.clone(),
            header_signature: header_signature.to_string(),
            payload: payload.clone(),
        }
    }
}

impl From<TransactionMessage> for Transaction {
    fn from(msg: TransactionMessage) -> Self {
        Transaction::from_parts(msg.header, msg.header_signature, msg.payload)
    }
}

impl From<&Batch> for BatchMessage {
    fn from(batch: &Batch) -> Self {
        let (header, header_signature, transactions) = batch.parts();
        Self {
            header: header.clone(),
            header_signature: header_signature.to_string(),
            transactions: transactions.iter().map(TransactionMessage::from).collect(),
        }
    }
}

impl From<BatchMessage> for Batch {
    fn from(msg: BatchMessage) -> Self {
        Batch::from_parts(
            msg.header,
            msg.header_signature,
            msg.transactions.into_iter().map(Transaction::from).collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Serialize `transactions`, in order, to wire bytes.
///
/// Payloads and headers are reference-counted, so building the list message
/// here does not copy them.
pub fn serialize_transactions(transactions: &[Transaction]) -> Vec<u8> {
    let list = TransactionList {
        transactions: transactions.iter().map(TransactionMessage::from).collect(),
    };
    let bytes = list.encode_to_vec();
    debug!(count = transactions.len(), bytes = bytes.len(), "serialized transactions");
    bytes
}

/// Serialize `batches`, in order, to wire bytes.
pub fn serialize_batches(batches: &[Batch]) -> Vec<u8> {
    let list = BatchList {
        batches: batches.iter().map(BatchMessage::from).collect(),
    };
    let bytes = list.encode_to_vec();
    debug!(count = batches.len(), bytes = bytes.len(), "serialized batches");
    bytes
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse bytes produced by [`serialize_transactions`].
pub fn parse_transactions(bytes: &[u8]) -> Result<Vec<Transaction>, DecodeError> {
    let list = TransactionList::decode(bytes).map_err(reject)?;
    ensure_canonical(&list, bytes)?;

    for (index, tx) in list.transactions.iter().enumerate() {
        check_transaction(tx, "transaction", index, "").map_err(reject)?;
    }

    debug!(count = list.transactions.len(), "parsed transactions");
    Ok(list.transactions.into_iter().map(Transaction::from).collect())
}

/// Parse bytes produced by [`serialize_batches`].
pub fn parse_batches(bytes: &[u8]) -> Result<Vec<Batch>, DecodeError> {
    let list = BatchList::decode(bytes).map_err(reject)?;
    ensure_canonical(&list, bytes)?;

    for (index, batch) in list.batches.iter().enumerate() {
        check_batch(batch, index).map_err(reject)?;
    }

    debug!(count = list.batches.len(), "parsed batches");
    Ok(list.batches.into_iter().map(Batch::from).collect())
}

fn reject<E: Into<DecodeError>>(err: E) -> DecodeError {
    let err = err.into();
    warn!(error = %err, "rejecting wire input");
    err
}

fn ensure_canonical<M: Message>(list: &M, bytes: &[u8]) -> Result<(), DecodeError> {
    let canonical = list.encode_to_vec();
    if canonical == bytes {
        return Ok(());
    }
    let offset = canonical
        .iter()
        .zip(bytes)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| canonical.len().min(bytes.len()));
    Err(reject(DecodeError::NonCanonical { offset }))
}

/// `value` must be exactly `expected` lowercase hex characters.
fn check_hex(value: &str, expected: usize) -> Result<(), String> {
    if value.len() != expected {
        return Err(format!(
            "expected {} hex characters, got {}",
            expected,
            value.len()
        ));
    }
    decode(value, Encoding::Hex).map_err(|e| e.to_string())?;
    Ok(())
}

fn invalid(item: &'static str, index: usize, field: String) -> impl FnOnce(String) -> DecodeError {
    move |reason| DecodeError::InvalidField {
        item,
        index,
        field,
        reason,
    }
}

fn check_transaction(
    tx: &TransactionMessage,
    item: &'static str,
    index: usize,
    prefix: &str,
) -> Result<(), DecodeError> {
    let header = TransactionHeader::from_bytes(&tx.header)
        .map_err(|e| invalid(item, index, format!("{}header", prefix))(e.to_string()))?;

    check_hex(&header.payload_sha512, SHA512_HEX_LENGTH).map_err(invalid(
        item,
        index,
        format!("{}header.payload_sha512", prefix),
    ))?;
    check_hex(&header.signer_public_key, PUBLIC_KEY_HEX_LENGTH).map_err(invalid(
        item,
        index,
        format!("{}header.signer_public_key", prefix),
    ))?;
    check_hex(&tx.header_signature, SIGNATURE_HEX_LENGTH).map_err(invalid(
        item,
        index,
        format!("{}header_signature", prefix),
    ))
}

fn check_batch(batch: &BatchMessage, index: usize) -> Result<(), DecodeError> {
    let header = BatchHeader::from_bytes(&batch.header)
        .map_err(|e| invalid("batch", index, "header".to_string())(e.to_string()))?;

    check_hex(&header.signer_public_key, PUBLIC_KEY_HEX_LENGTH).map_err(invalid(
        "batch",
        index,
        "header.signer_public_key".to_string(),
    ))?;
    check_hex(&batch.header_signature, SIGNATURE_HEX_LENGTH).map_err(invalid(
        "batch",
        index,
        "header_signature".to_string(),
    ))?;

    for (position, tx) in batch.transactions.iter().enumerate() {
        let prefix = format!("transactions[{}].", position);
        check_transaction(tx, "batch", index, &prefix)?;
    }
    Ok(())
}
