// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledger SDK
//!
//! Client-side plumbing for a batch-oriented distributed ledger: make keys,
//! sign things, wrap payloads into signed transactions, group those into
//! signed batches, and turn the lot into bytes the network will accept.
//!
//! Signing is secp256k1 ECDSA over SHA-256 with RFC 6979 nonces and low-S
//! normalization, so the same key and the same message always give the
//! same 64 bytes. Headers are protobuf with a fixed field order, so the same
//! fields always give the same header bytes. Put those together and a batch
//! is reproducible down to the last byte, which is exactly what validators
//! on the other end need.
//!
//! ## Architecture
//!
//! - **crypto** — Hex encoding, hashing, keys, and sign/verify.
//! - **transaction** — Headers, signed transactions and batches, and
//!   self-consistency checks.
//! - **encoder** — A key plus default parameters; builds transactions and
//!   batches.
//! - **wire** — List serialization and strict parsing.
//! - **logging** — Optional `tracing` subscriber setup.
//! - **error** — One error type to rule the module errors.
//! - **config** — Curve parameters and fixed lengths.
//!
//! ## Quick start
//!
//! ```
//! use ledger_sdk::{Encoder, PrivateKey, TransactionParams};
//!
//! let key = PrivateKey::generate()?;
//! let encoder = Encoder::new(
//!     key,
//!     TransactionParams {
//!         family_name: "intkey".into(),
//!         family_version: "1.0".into(),
//!         ..Default::default()
//!     },
//! );
//!
//! let tx = encoder.new_transaction(
//!     &b"set x 1"[..],
//!     &TransactionParams { nonce: "1".into(), ..Default::default() },
//! )?;
//! let batch = encoder.new_batch(vec![tx])?;
//!
//! let bytes = ledger_sdk::serialize_batches(&[batch.clone()]);
//! assert_eq!(ledger_sdk::parse_batches(&bytes)?, vec![batch]);
//! # Ok::<(), ledger_sdk::Error>(())
//! ```

pub mod config;
pub mod crypto;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod transaction;
pub mod wire;

pub use crypto::{PrivateKey, PublicKey, Signature};
pub use encoder::{ConfigError, Encoder, EncoderError, TransactionParams};
pub use error::{Error, Result};
pub use transaction::{Batch, BatchHeader, Transaction, TransactionHeader};
pub use wire::{parse_batches, parse_transactions, serialize_batches, serialize_transactions};
