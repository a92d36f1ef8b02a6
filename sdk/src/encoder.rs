//! # Encoder
//!
//! Turns payloads into signed [`Transaction`]s and transactions into signed
//! [`Batch`]es.
//!
//! An [`Encoder`] is a signing key plus a set of default
//! [`TransactionParams`]. Each call to [`Encoder::new_transaction`] merges
//! the defaults with per-call overrides (override wins, field by field),
//! builds the canonical header, and signs it. The encoder itself never
//! changes after construction, so one encoder can be shared freely across
//! threads.
//!
//! The merge is a plain function ([`TransactionParams::merge`]) so its
//! semantics can be tested without touching a key.
//!
//! ```
//! use ledger_sdk::{Encoder, TransactionParams};
//! use ledger_sdk::crypto::PrivateKey;
//!
//! let encoder = Encoder::new(
//!     PrivateKey::generate().unwrap(),
//!     TransactionParams {
//!         family_name: "intkey".into(),
//!         family_version: "1.0".into(),
//!         ..Default::default()
//!     },
//! );
//!
//! let tx = encoder
//!     .new_transaction(b"set x 1".to_vec(), &TransactionParams {
//!         nonce: "1".into(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! let batch = encoder.new_batch(vec![tx]).unwrap();
//! assert!(batch.is_valid());
//! ```

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::crypto::signing::{sign, SigningError};
use crate::transaction::header::{BatchHeader, TransactionHeaderBuilder};
use crate::transaction::types::{Batch, Transaction};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The merged parameters are not enough to build a transaction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is empty in both the defaults and the overrides.
    #[error("required transaction field `{0}` is not set in defaults or overrides")]
    MissingField(&'static str),

    /// Parameters loaded from JSON did not parse.
    #[error("invalid transaction parameters: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can go wrong inside an [`Encoder`] call.
#[derive(Debug, Error)]
pub enum EncoderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Signing(#[from] SigningError),
}

// ---------------------------------------------------------------------------
// TransactionParams
// ---------------------------------------------------------------------------

/// The mergeable subset of a transaction header.
///
/// An empty string or empty list means "not set". `payload_sha512` and
/// `signer_public_key` are not here because the encoder always computes
/// them itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransactionParams {
    /// Defaults to the encoder's own public key when unset.
    pub batcher_public_key: String,
    pub dependencies: Vec<String>,
    pub family_name: String,
    pub family_version: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub payload_encoding: String,
    pub nonce: String,
}

fn pick_str(overrides: &str, defaults: &str) -> String {
    if overrides.is_empty() {
        defaults.to_string()
    } else {
        overrides.to_string()
    }
}

fn pick_list(overrides: &[String], defaults: &[String]) -> Vec<String> {
    if overrides.is_empty() {
        defaults.to_vec()
    } else {
        overrides.to_vec()
    }
}

impl TransactionParams {
    /// Override-wins merge. A set field in `overrides` replaces the same
    /// field in `defaults`; an unset one leaves the default alone. Lists are
    /// replaced wholesale, never concatenated.
    pub fn merge(defaults: &Self, overrides: &Self) -> Self {
        Self {
            batcher_public_key: pick_str(&overrides.batcher_public_key, &defaults.batcher_public_key),
            dependencies: pick_list(&overrides.dependencies, &defaults.dependencies),
            family_name: pick_str(&overrides.family_name, &defaults.family_name),
            family_version: pick_str(&overrides.family_version, &defaults.family_version),
            inputs: pick_list(&overrides.inputs, &defaults.inputs),
            outputs: pick_list(&overrides.outputs, &defaults.outputs),
            payload_encoding: pick_str(&overrides.payload_encoding, &defaults.payload_encoding),
            nonce: pick_str(&overrides.nonce, &defaults.nonce),
        }
    }

    /// Load parameters from a JSON object with snake_case keys. Missing keys
    /// are unset; unknown keys are an error (typos in config files should
    /// be loud).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    fn require_family(&self) -> Result<(), ConfigError> {
        if self.family_name.is_empty() {
            return Err(ConfigError::MissingField("family_name"));
        }
        if self.family_version.is_empty() {
            return Err(ConfigError::MissingField("family_version"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// A signing key bundled with default transaction parameters.
///
/// Construction does no validation: defaults may be incomplete as long as
/// every call supplies what's missing. Required fields are checked when a
/// transaction is actually built.
#[derive(Debug, Clone)]
pub struct Encoder {
    private_key: PrivateKey,
    public_key: PublicKey,
    defaults: TransactionParams,
}

impl Encoder {
    pub fn new(private_key: PrivateKey, defaults: TransactionParams) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
            defaults,
        }
    }

    /// The public key every header from this encoder is signed with.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn defaults(&self) -> &TransactionParams {
        &self.defaults
    }

    /// Build and sign a transaction carrying `payload`.
    ///
    /// `family_name` and `family_version` must be set in the defaults or in
    /// `overrides`, otherwise this fails with [`ConfigError::MissingField`].
    pub fn new_transaction(
        &self,
        payload: impl Into<Bytes>,
        overrides: &TransactionParams,
    ) -> Result<Transaction, EncoderError> {
        let params = TransactionParams::merge(&self.defaults, overrides);
        params.require_family()?;

        let batcher_public_key = if params.batcher_public_key.is_empty() {
            self.public_key.to_hex()
        } else {
            params.batcher_public_key
        };

        let payload = payload.into();
        let header = TransactionHeaderBuilder::new()
            .batcher_public_key(batcher_public_key)
            .dependencies(params.dependencies)
            .family_name(params.family_name)
            .family_version(params.family_version)
            .inputs(params.inputs)
            .outputs(params.outputs)
            .payload_encoding(params.payload_encoding)
            .payload(&payload)
            .signer_public_key(&self.public_key)
            .nonce(params.nonce)
            .build();

        let header_bytes = header.to_bytes();
        let signature = sign(&header_bytes, &self.private_key)?.to_hex();

        debug!(
            family = %header.family_name,
            version = %header.family_version,
            nonce = %header.nonce,
            payload_len = payload.len(),
            id = &signature[..16],
            "built transaction"
        );

        Ok(Transaction::from_parts(
            Bytes::from(header_bytes),
            signature,
            payload,
        ))
    }

    /// Wrap `transactions` in a signed batch.
    ///
    /// The batch header lists each transaction's header signature in exactly
    /// the order given. The vector is moved into the batch as-is.
    pub fn new_batch(&self, transactions: Vec<Transaction>) -> Result<Batch, EncoderError> {
        let transaction_ids = transactions
            .iter()
            .map(|tx| tx.header_signature().to_string())
            .collect();

        let header_bytes = BatchHeader::new(&self.public_key, transaction_ids).to_bytes();
        let signature = sign(&header_bytes, &self.private_key)?.to_hex();

        debug!(
            transactions = transactions.len(),
            id = &signature[..16],
            "built batch"
        );

        Ok(Batch::from_parts(
            Bytes::from(header_bytes),
            signature,
            transactions,
        ))
    }
}
