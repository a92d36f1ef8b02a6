//! Internal-consistency checks for signed transactions and batches.
//!
//! This is not ledger validation. It checks only what the bytes promise
//! about themselves: the header decodes, the signature verifies against the
//! key named in the header, the payload matches its digest, and a batch's
//! ID list matches the transactions it carries. Whether the network will
//! accept the batch is somebody else's problem.
//!
//! Checks run cheapest first, so garbage fails before any curve math.

use thiserror::Error;

use super::header::BatchHeader;
use super::types::{Batch, Transaction};
use crate::crypto::hash::sha512_hex;
use crate::crypto::keys::{PublicKey, Signature};
use crate::crypto::signing::verify;
use crate::wire::DecodeError;

/// Why a transaction or batch failed verification.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("header does not decode: {0}")]
    MalformedHeader(#[from] DecodeError),

    #[error("header names an invalid signer public key: {0}")]
    InvalidSignerKey(String),

    #[error("header signature is not a 64-byte hex signature")]
    MalformedSignature,

    #[error("header signature does not verify against signer {signer}")]
    BadSignature { signer: String },

    #[error("payload digest mismatch: header says {expected}, payload hashes to {actual}")]
    PayloadDigestMismatch { expected: String, actual: String },

    #[error("batch header lists {ids} transaction ids but carries {transactions} transactions")]
    TransactionCountMismatch { ids: usize, transactions: usize },

    #[error("transaction id #{index} is {listed} but transaction carries {actual}")]
    TransactionIdMismatch {
        index: usize,
        listed: String,
        actual: String,
    },

    #[error("transaction #{index} failed verification: {source}")]
    Transaction {
        index: usize,
        #[source]
        source: Box<VerificationError>,
    },
}

fn check_signature(
    header_bytes: &[u8],
    header_signature: &str,
    signer_hex: &str,
) -> Result<(), VerificationError> {
    let signer = PublicKey::from_hex(signer_hex)
        .map_err(|e| VerificationError::InvalidSignerKey(e.to_string()))?;
    let signature =
        Signature::from_hex(header_signature).map_err(|_| VerificationError::MalformedSignature)?;

    if verify(header_bytes, &signature, &signer) {
        Ok(())
    } else {
        Err(VerificationError::BadSignature {
            signer: signer_hex.to_string(),
        })
    }
}

/// Verify a single transaction: header, signature, and payload digest.
pub fn verify_transaction(tx: &Transaction) -> Result<(), VerificationError> {
    let header = tx.decode_header()?;

    let actual = sha512_hex(tx.payload());
    if actual != header.payload_sha512 {
        return Err(VerificationError::PayloadDigestMismatch {
            expected: header.payload_sha512,
            actual,
        });
    }

    check_signature(tx.header(), tx.header_signature(), &header.signer_public_key)
}

/// Verify a batch: its own signature, that its ID list matches its
/// transactions element-for-element, and every transaction inside it.
pub fn verify_batch(batch: &Batch) -> Result<(), VerificationError> {
    let header = BatchHeader::from_bytes(batch.header())?;
    let transactions = batch.transactions();

    if header.transaction_ids.len() != transactions.len() {
        return Err(VerificationError::TransactionCountMismatch {
            ids: header.transaction_ids.len(),
            transactions: transactions.len(),
        });
    }

    for (index, (listed, tx)) in header.transaction_ids.iter().zip(transactions).enumerate() {
        if listed != tx.header_signature() {
            return Err(VerificationError::TransactionIdMismatch {
                index,
                listed: listed.clone(),
                actual: tx.header_signature().to_string(),
            });
        }
    }

    check_signature(batch.header(), batch.header_signature(), &header.signer_public_key)?;

    for (index, tx) in transactions.iter().enumerate() {
        verify_transaction(tx).map_err(|e| VerificationError::Transaction {
            index,
            source: Box::new(e),
        })?;
    }

    Ok(())
}

impl Transaction {
    /// `true` if [`verify_transaction`] passes.
    pub fn is_valid(&self) -> bool {
        verify_transaction(self).is_ok()
    }
}

impl Batch {
    /// `true` if [`verify_batch`] passes.
    pub fn is_valid(&self) -> bool {
        verify_batch(self).is_ok()
    }
}
