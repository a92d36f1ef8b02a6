//! Signed transactions and batches.
//!
//! Both types are immutable once built: fields are private, there is no
//! `Default`, and the only ways to get one are [`crate::Encoder`] or
//! [`crate::wire`] parsing. The protobuf framing lives in `wire`. Payloads
//! and header bytes are held as [`Bytes`], so cloning a transaction (or a
//! batch full of them) bumps reference counts instead of copying payloads.

use bytes::Bytes;

use super::header::{BatchHeader, TransactionHeader};
use crate::wire::DecodeError;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A signed transaction: canonical header bytes, the signature over them,
/// and the opaque payload.
///
/// The hex `header_signature` is the transaction's ID. It is what batch
/// headers and other transactions' `dependencies` refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    header: Bytes,
    header_signature: String,
    payload: Bytes,
}

impl Transaction {
    pub(crate) fn from_parts(header: Bytes, header_signature: String, payload: Bytes) -> Self {
        Self {
            header,
            header_signature,
            payload,
        }
    }

    /// The exact header bytes that were signed.
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// Hex signature over [`header`](Self::header); also the transaction ID.
    pub fn header_signature(&self) -> &str {
        &self.header_signature
    }

    /// Alias for [`header_signature`](Self::header_signature).
    pub fn id(&self) -> &str {
        &self.header_signature
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Split into `(header, header_signature, payload)` without copying.
    pub(crate) fn parts(&self) -> (&Bytes, &str, &Bytes) {
        (&self.header, &self.header_signature, &self.payload)
    }

    /// Decode the header bytes back into fields.
    pub fn decode_header(&self) -> Result<TransactionHeader, DecodeError> {
        TransactionHeader::from_bytes(&self.header)
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// A signed, ordered group of transactions that the network accepts or
/// rejects as a unit.
///
/// The batch header lists every transaction's `header_signature` in the same
/// order as [`transactions`](Self::transactions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    header: Bytes,
    header_signature: String,
    transactions: Vec<Transaction>,
}

impl Batch {
    pub(crate) fn from_parts(
        header: Bytes,
        header_signature: String,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            header,
            header_signature,
            transactions,
        }
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn header_signature(&self) -> &str {
        &self.header_signature
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn parts(&self) -> (&Bytes, &str, &[Transaction]) {
        (&self.header, &self.header_signature, &self.transactions)
    }

    /// Take the transactions out of the batch.
    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    pub fn decode_header(&self) -> Result<BatchHeader, DecodeError> {
        BatchHeader::from_bytes(&self.header)
    }
}
