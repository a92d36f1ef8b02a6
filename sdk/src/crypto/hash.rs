//! # Hashing Utilities
//!
//! Two hash functions, two jobs:
//!
//! - **SHA-256** is the digest that gets signed. Signing never sees the raw
//!   header bytes, only `SHA-256(header)`.
//! - **SHA-512** is the payload digest embedded in every transaction header,
//!   binding the signed header to the exact payload bytes it travels with.
//!
//! Nothing else. If you need a third hash function, you probably need a
//! different library.

use sha2::{Digest, Sha256, Sha512};

use crate::config::{SHA256_LENGTH, SHA512_LENGTH};

/// Compute the SHA-256 digest of `data`.
///
/// # Example
///
/// ```
/// use ledger_sdk::crypto::hash::sha256;
///
/// assert_eq!(sha256(b"ledger").len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; SHA256_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0u8; SHA256_LENGTH];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Compute the SHA-512 digest of `data`.
pub fn sha512(data: &[u8]) -> [u8; SHA512_LENGTH] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let mut output = [0u8; SHA512_LENGTH];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// SHA-512 of `data`, as the lowercase hex string stored in
/// `TransactionHeader::payload_sha512`.
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(sha512(data))
}
