//! # Key Management
//!
//! secp256k1 private keys, compressed public keys, and compact signatures.
//!
//! Every transaction and batch header is signed by exactly one of these
//! keys, and the matching public key is embedded in the header in hex so
//! any validator can check the signature without a lookup.
//!
//! ## Entropy is injected, not ambient
//!
//! Key generation takes the randomness source as an argument
//! ([`generate_private_key`], [`PrivateKey::generate_with`]). Production
//! code hands in `OsRng` (or calls [`PrivateKey::generate`], which does
//! exactly that); tests hand in a seeded `StdRng` and get the same key every
//! run. Nothing in this module reaches for a global RNG behind your back.
//!
//! ## Security considerations
//!
//! - `PrivateKey` does not implement `Serialize`. Exporting a secret should
//!   be an explicit `to_bytes()` / `to_hex()` call, not a side effect of
//!   dumping a struct to JSON.
//! - `Debug` for `PrivateKey` prints the public key only.
//! - The underlying `k256::ecdsa::SigningKey` zeroizes itself on drop.

use std::fmt;

use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::trace;

use super::encoding::{decode, encode, Encoding, EncodingError};
use crate::config::{MAX_KEYGEN_ATTEMPTS, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur while creating or parsing key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The entropy source failed or never produced a usable scalar.
    #[error("private key generation failed: {0}")]
    Generation(String),

    /// 32 bytes that are zero or not below the curve order.
    #[error("invalid private key: not a scalar in [1, n-1]")]
    InvalidPrivateKey,

    /// 33 bytes that don't decompress to a point on secp256k1.
    #[error("invalid public key: not a compressed secp256k1 point")]
    InvalidPublicKey,

    /// Right encoding, wrong size.
    #[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The hex text itself was malformed.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 private key: 32 bytes, guaranteed to be a valid scalar.
///
/// Construction validates the scalar, so every `PrivateKey` you can hold is
/// usable for signing.
///
/// # Examples
///
/// ```
/// use ledger_sdk::crypto::keys::PrivateKey;
///
/// let key = PrivateKey::from_hex(
///     "ad8523ac9f1e7a9fdaa42c25ca766b7b099c871e7c0705ae191e0bef22b5d8cb",
/// ).unwrap();
/// assert_eq!(key.public_key().as_bytes().len(), 33);
/// ```
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Generate a fresh key from the operating system's CSPRNG.
    pub fn generate() -> Result<Self, KeyError> {
        generate_private_key(&mut OsRng)
    }

    /// Generate a fresh key from a caller-supplied entropy source.
    pub fn generate_with<R>(rng: &mut R) -> Result<Self, KeyError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        generate_private_key(rng)
    }

    /// Load a key from its raw 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidLength {
                kind: "private key",
                expected: PRIVATE_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Load a key from lowercase hex.
    pub fn from_hex(text: &str) -> Result<Self, KeyError> {
        let bytes = decode(text, Encoding::Hex)?;
        Self::from_bytes(&bytes)
    }

    /// Export the raw scalar. Handle with care; this is the whole secret.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        let mut out = [0u8; PRIVATE_KEY_LENGTH];
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    /// Export the raw scalar as lowercase hex.
    pub fn to_hex(&self) -> String {
        encode(&self.to_bytes(), Encoding::Hex)
    }

    /// The compressed public key for this private key.
    pub fn public_key(&self) -> PublicKey {
        derive_public_key(self)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(pub={})", self.public_key().to_hex())
    }
}

/// Draw a private key from `rng`.
///
/// Values outside `[1, n-1]` are discarded and redrawn, up to
/// [`MAX_KEYGEN_ATTEMPTS`] times. A source that reports an error, or one
/// that keeps producing out-of-range values, yields [`KeyError::Generation`].
pub fn generate_private_key<R>(rng: &mut R) -> Result<PrivateKey, KeyError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut candidate = [0u8; PRIVATE_KEY_LENGTH];

    for attempt in 0..MAX_KEYGEN_ATTEMPTS {
        rng.try_fill_bytes(&mut candidate)
            .map_err(|e| KeyError::Generation(e.to_string()))?;

        let drawn = SigningKey::from_slice(&candidate);
        candidate.fill(0);

        match drawn {
            Ok(signing_key) => return Ok(PrivateKey { signing_key }),
            Err(_) => trace!(attempt, "entropy draw outside scalar range, redrawing"),
        }
    }

    Err(KeyError::Generation(format!(
        "no valid scalar after {} draws",
        MAX_KEYGEN_ATTEMPTS
    )))
}

/// Derive the 33-byte compressed public key of `private_key`.
///
/// Pure and deterministic: the same private key always yields the same bytes.
pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    let point = private_key.signing_key.verifying_key().to_encoded_point(true);
    let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
    bytes.copy_from_slice(point.as_bytes());
    PublicKey { bytes }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A SEC1-compressed secp256k1 public key (33 bytes).
///
/// Serializes through serde as its lowercase hex string, which is also how
/// it appears inside headers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    /// Parse compressed SEC1 bytes, rejecting anything not exactly 33 bytes
    /// or not on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(KeyError::InvalidLength {
                kind: "public key",
                expected: PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        VerifyingKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPublicKey)?;

        let mut arr = [0u8; PUBLIC_KEY_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Parse the lowercase hex form found in headers.
    pub fn from_hex(text: &str) -> Result<Self, KeyError> {
        let bytes = decode(text, Encoding::Hex)?;
        Self::from_bytes(&bytes)
    }

    /// Raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Lowercase hex, 66 characters.
    pub fn to_hex(&self) -> String {
        encode(&self.bytes, Encoding::Hex)
    }

    pub(crate) fn verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        VerifyingKey::from_sec1_bytes(&self.bytes).map_err(|_| KeyError::InvalidPublicKey)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A compact ECDSA signature: `r ‖ s`, 32 bytes each, `s` in low form.
///
/// The hex form of a transaction's header signature doubles as that
/// transaction's ID, which is why this type is `Hash` and cheap to copy.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    pub(crate) fn from_array(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Wrap 64 raw bytes. Only the length is checked here; whether `r` and
    /// `s` are in range is a question for verification.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(KeyError::InvalidLength {
                kind: "signature",
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; SIGNATURE_LENGTH];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Parse the 128-character lowercase hex form.
    pub fn from_hex(text: &str) -> Result<Self, KeyError> {
        let bytes = decode(text, Encoding::Hex)?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        encode(&self.bytes, Encoding::Hex)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PRIVATE_HEX: &str = "ad8523ac9f1e7a9fdaa42c25ca766b7b099c871e7c0705ae191e0bef22b5d8cb";
    const PUBLIC_HEX: &str = "03d6d8ab906a0ad263628e9c81f01a73dc0361c51c90a1b583aece8103126bf40c";

    /// An entropy source that has run dry.
    struct ExhaustedRng;

    impl RngCore for ExhaustedRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new("entropy source exhausted"))
        }
    }

    impl CryptoRng for ExhaustedRng {}

    /// A source that "works" but only ever produces zeros, which is never a
    /// valid scalar.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    impl CryptoRng for ZeroRng {}

    #[test]
    fn known_private_key_derives_known_public_key() {
        let key = PrivateKey::from_hex(PRIVATE_HEX).unwrap();
        assert_eq!(key.public_key().to_hex(), PUBLIC_HEX);
    }

    #[test]
    fn private_key_hex_roundtrip() {
        let key = PrivateKey::from_hex(PRIVATE_HEX).unwrap();
        assert_eq!(key.to_hex(), PRIVATE_HEX);
    }

    #[test]
    fn generated_public_key_is_33_bytes_compressed() {
        let key = PrivateKey::generate().unwrap();
        let pk = key.public_key();
        assert_eq!(pk.as_bytes().len(), 33);
        assert!(matches!(pk.as_bytes()[0], 0x02 | 0x03));
    }

    #[test]
    fn seeded_rng_generates_reproducible_keys() {
        let a = PrivateKey::generate_with(&mut StdRng::seed_from_u64(7)).unwrap();
        let b = PrivateKey::generate_with(&mut StdRng::seed_from_u64(7)).unwrap();
        let c = PrivateKey::generate_with(&mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(a.to_bytes(), b.to_bytes());
        assert_ne!(a.to_bytes(), c.to_bytes());
    }

    #[test]
    fn two_generated_keys_differ() {
        let a = PrivateKey::generate().unwrap();
        let b = PrivateKey::generate().unwrap();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn failing_entropy_source_is_reported() {
        let err = generate_private_key(&mut ExhaustedRng).unwrap_err();
        assert!(matches!(err, KeyError::Generation(msg) if msg.contains("exhausted")));
    }

    #[test]
    fn out_of_range_draws_eventually_give_up() {
        assert!(matches!(
            generate_private_key(&mut ZeroRng),
            Err(KeyError::Generation(_))
        ));
    }

    #[test]
    fn zero_scalar_is_rejected() {
        assert!(matches!(
            PrivateKey::from_bytes(&[0u8; 32]),
            Err(KeyError::InvalidPrivateKey)
        ));
    }

    #[test]
    fn scalar_above_curve_order_is_rejected() {
        assert!(matches!(
            PrivateKey::from_bytes(&[0xff; 32]),
            Err(KeyError::InvalidPrivateKey)
        ));
    }

    #[test]
    fn private_key_wrong_length_is_rejected() {
        assert!(matches!(
            PrivateKey::from_bytes(&[1u8; 31]),
            Err(KeyError::InvalidLength { expected: 32, actual: 31, .. })
        ));
    }

    #[test]
    fn public_key_hex_roundtrip() {
        let pk = PublicKey::from_hex(PUBLIC_HEX).unwrap();
        assert_eq!(pk.to_hex(), PUBLIC_HEX);
    }

    #[test]
    fn public_key_rejects_wrong_length() {
        // Drop the last byte: 32 bytes is not a compressed key.
        let short = &PUBLIC_HEX[..64];
        assert!(matches!(
            PublicKey::from_hex(short),
            Err(KeyError::InvalidLength { expected: 33, actual: 32, .. })
        ));
        assert!(matches!(
            PublicKey::from_hex(&PUBLIC_HEX[..65]),
            Err(KeyError::Encoding(EncodingError::OddLength { .. }))
        ));
    }

    #[test]
    fn public_key_rejects_off_curve_point() {
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        bytes[1..].fill(0xff);
        assert!(matches!(
            PublicKey::from_bytes(&bytes),
            Err(KeyError::InvalidPublicKey)
        ));
    }

    #[test]
    fn public_key_serde_uses_hex() {
        let pk = PublicKey::from_hex(PUBLIC_HEX).unwrap();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json, format!("\"{}\"", PUBLIC_HEX));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
        assert!(serde_json::from_str::<PublicKey>("\"03ab\"").is_err());
    }

    #[test]
    fn signature_rejects_wrong_length() {
        assert!(Signature::from_slice(&[0u8; 63]).is_err());
        assert!(Signature::from_hex("00").is_err());
        assert!(Signature::from_slice(&[0u8; 64]).is_ok());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = PrivateKey::from_hex(PRIVATE_HEX).unwrap();
        let debug_str = format!("{:?}", key);
        assert!(debug_str.starts_with("PrivateKey(pub="));
        assert!(!debug_str.contains(PRIVATE_HEX));
    }
}
