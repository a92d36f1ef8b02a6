//! Canonical transaction and batch headers.
//!
//! A header is the thing that gets signed, so its byte representation has
//! to be a pure function of its field values. The protobuf tags below are
//! the one and only definition of field order: prost emits fields in tag
//! order no matter how the struct was filled in, omits empty strings and
//! empty lists, and contains no maps whose iteration order could wobble.
//!
//! Note that `nonce` sits at tag 6, between `inputs` and `outputs`. That is
//! the order the ledger network's validators expect and re-derive, so it
//! stays exactly where it is.
//!
//! Keys and digests are stored as lowercase hex strings, not raw bytes.
//! Again: that's what the network signs over.

use prost::Message;

use crate::crypto::hash::sha512_hex;
use crate::crypto::keys::PublicKey;
use crate::wire::DecodeError;

// ---------------------------------------------------------------------------
// TransactionHeader
// ---------------------------------------------------------------------------

/// The signed portion of a transaction.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct TransactionHeader {
    /// Hex public key of whoever will wrap this transaction in a batch.
    #[prost(string, tag = "1")]
    pub batcher_public_key: String,

    /// Header signatures (transaction IDs) this transaction depends on.
    /// Ordered, duplicates allowed.
    #[prost(string, repeated, tag = "2")]
    pub dependencies: Vec<String>,

    #[prost(string, tag = "3")]
    pub family_name: String,

    #[prost(string, tag = "4")]
    pub family_version: String,

    /// State addresses read by the transaction. Ordered, duplicates allowed.
    #[prost(string, repeated, tag = "5")]
    pub inputs: Vec<String>,

    #[prost(string, tag = "6")]
    pub nonce: String,

    /// State addresses written by the transaction. Ordered, duplicates allowed.
    #[prost(string, repeated, tag = "7")]
    pub outputs: Vec<String>,

    /// Free-text tag describing how the payload bytes are encoded. Opaque
    /// to this crate.
    #[prost(string, tag = "8")]
    pub payload_encoding: String,

    /// Lowercase hex SHA-512 of the payload (128 characters).
    #[prost(string, tag = "9")]
    pub payload_sha512: String,

    /// Hex public key of the key that signs this header.
    #[prost(string, tag = "10")]
    pub signer_public_key: String,
}

impl TransactionHeader {
    /// Canonical bytes. Same field values in, same bytes out.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Parse header bytes taken from a [`super::Transaction`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self::decode(bytes)?)
    }
}

/// Fluent builder for [`TransactionHeader`].
///
/// Field setters can be called in any order; the resulting bytes depend
/// only on the final values.
///
/// ```
/// use ledger_sdk::transaction::TransactionHeaderBuilder;
///
/// let header = TransactionHeaderBuilder::new()
///     .family_name("intkey")
///     .family_version("1.0")
///     .payload(b"set x 1")
///     .nonce("42")
///     .build();
///
/// assert_eq!(header.payload_sha512.len(), 128);
/// ```
#[derive(Debug, Default)]
pub struct TransactionHeaderBuilder {
    header: TransactionHeader,
}

impl TransactionHeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batcher_public_key(mut self, public_key_hex: impl Into<String>) -> Self {
        self.header.batcher_public_key = public_key_hex.into();
        self
    }

    pub fn dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.header.dependencies = dependencies;
        self
    }

    pub fn family_name(mut self, family_name: impl Into<String>) -> Self {
        self.header.family_name = family_name.into();
        self
    }

    pub fn family_version(mut self, family_version: impl Into<String>) -> Self {
        self.header.family_version = family_version.into();
        self
    }

    pub fn inputs(mut self, inputs: Vec<String>) -> Self {
        self.header.inputs = inputs;
        self
    }

    pub fn outputs(mut self, outputs: Vec<String>) -> Self {
        self.header.outputs = outputs;
        self
    }

    pub fn payload_encoding(mut self, payload_encoding: impl Into<String>) -> Self {
        self.header.payload_encoding = payload_encoding.into();
        self
    }

    /// Digest `payload` into `payload_sha512`. The payload itself is not
    /// stored in the header.
    pub fn payload(mut self, payload: &[u8]) -> Self {
        self.header.payload_sha512 = sha512_hex(payload);
        self
    }

    pub fn signer_public_key(mut self, public_key: &PublicKey) -> Self {
        self.header.signer_public_key = public_key.to_hex();
        self
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.header.nonce = nonce.into();
        self
    }

    pub fn build(self) -> TransactionHeader {
        self.header
    }
}

// ---------------------------------------------------------------------------
// BatchHeader
// ---------------------------------------------------------------------------

/// The signed portion of a batch.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct BatchHeader {
    #[prost(string, tag = "1")]
    pub signer_public_key: String,

    /// Header signatures of the batch's transactions, in batch order.
    #[prost(string, repeated, tag = "2")]
    pub transaction_ids: Vec<String>,
}

impl BatchHeader {
    pub fn new(signer: &PublicKey, transaction_ids: Vec<String>) -> Self {
        Self {
            signer_public_key: signer.to_hex(),
            transaction_ids,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self::decode(bytes)?)
    }
}
