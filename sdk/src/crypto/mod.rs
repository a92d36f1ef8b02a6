//! # Cryptographic Primitives
//!
//! Everything that touches key material or digests lives here:
//!
//! - **encoding** — strict lowercase hex, the text form of every key,
//!   signature and digest that appears in a header.
//! - **hash** — SHA-256 (what gets signed) and SHA-512 (payload digests).
//! - **keys** — secp256k1 private/public keys, compact signatures, and key
//!   generation from an injected entropy source.
//! - **signing** — deterministic RFC 6979 ECDSA with low-S normalization.
//!
//! The curve arithmetic is `k256`'s. This module only decides which bytes
//! go in and which bytes come out.

pub mod encoding;
pub mod hash;
pub mod keys;
pub mod signing;

pub use encoding::{decode, encode, Encoding, EncodingError};
pub use hash::{sha256, sha512, sha512_hex};
pub use keys::{derive_public_key, generate_private_key, KeyError, PrivateKey, PublicKey, Signature};
pub use signing::{sign, sign_raw, verify, verify_raw, SigningError};
