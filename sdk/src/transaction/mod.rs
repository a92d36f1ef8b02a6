//! # Transaction Module
//!
//! Canonical headers and the signed values built from them.
//!
//! ## Architecture
//!
//! ```text
//! header.rs       — TransactionHeader / BatchHeader schemas and the header builder
//! types.rs        — Transaction and Batch, the signed values that go on the wire
//! verification.rs — internal-consistency checks for signed values
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — [`crate::Encoder`] merges parameters and fills a
//!    [`TransactionHeaderBuilder`].
//! 2. **Sign** — the header's canonical bytes are signed; the hex signature
//!    becomes the transaction ID.
//! 3. **Batch** — transaction IDs are listed, in order, in a [`BatchHeader`],
//!    which is signed in turn.
//! 4. **Ship** — [`crate::wire`] serializes the result for submission.
//! 5. **Check** — anyone holding the bytes can run [`verify_batch`].
//!
//! ## Design Decisions
//!
//! - Transaction identity is the header signature, never a hash of some
//!   in-memory struct. Two parties holding the same bytes agree on the ID.
//! - Header field order is fixed by protobuf tags, defined exactly once in
//!   `header.rs`.
//! - `dependencies`, `inputs` and `outputs` are ordered lists that may
//!   contain duplicates. No sorting, no dedup: the signer's order is the
//!   signed order.

pub mod header;
pub mod types;
pub mod verification;

pub use header::{BatchHeader, TransactionHeader, TransactionHeaderBuilder};
pub use types::{Batch, Transaction};
pub use verification::{verify_batch, verify_transaction, VerificationError};
