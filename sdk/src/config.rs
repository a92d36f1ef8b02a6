//! # SDK Constants
//!
//! Every fixed size and magic string the SDK depends on lives here. The
//! ledger network agrees on these values byte-for-byte, so changing one is
//! not a refactor, it's a hard fork you didn't tell anyone about.

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// Raw private key length: one 256-bit scalar.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// SEC1 compressed public key length: one parity byte plus the 32-byte
/// x-coordinate.
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Compact ECDSA signature length (`r ‖ s`, 32 bytes each).
pub const SIGNATURE_LENGTH: usize = 64;

/// How many times key generation redraws from the entropy source before
/// giving up. A uniformly random 256-bit value falls outside the secp256k1
/// scalar range with probability ~2^-128, so hitting this limit means the
/// source is broken, not unlucky.
pub const MAX_KEYGEN_ATTEMPTS: usize = 64;

// ---------------------------------------------------------------------------
// Digests
// ---------------------------------------------------------------------------

/// SHA-256 digest length. This is what actually gets signed.
pub const SHA256_LENGTH: usize = 32;

/// SHA-512 digest length, used for the payload digest in transaction headers.
pub const SHA512_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Text Encodings
// ---------------------------------------------------------------------------

/// Name accepted by [`crate::crypto::Encoding::from_str`] for lowercase hex.
pub const HEX_ENCODING_NAME: &str = "hex";

/// Hex length of a compressed public key on the wire.
pub const PUBLIC_KEY_HEX_LENGTH: usize = PUBLIC_KEY_LENGTH * 2;

/// Hex length of a header signature (and therefore of a transaction ID).
pub const SIGNATURE_HEX_LENGTH: usize = SIGNATURE_LENGTH * 2;

/// Hex length of the payload digest stored in a transaction header.
pub const SHA512_HEX_LENGTH: usize = SHA512_LENGTH * 2;
