//! # Digital Signatures
//!
//! ECDSA over secp256k1, signing `SHA-256(message)`.
//!
//! Two properties matter more than anything else here:
//!
//! 1. **Determinism.** Nonces come from RFC 6979 (HMAC-SHA256), so the same
//!    `(message, key)` pair produces the same 64 bytes in every process, on
//!    every machine, forever. Test vectors depend on it, and so does anyone
//!    auditing a batch by recomputing its signatures.
//! 2. **Low-S.** Every signature is normalized so `s <= n/2`. The high-S
//!    twin of a valid signature is also valid ECDSA, and letting both exist
//!    would give every transaction two IDs.
//!
//! Verification answers with a `bool`. A bad signature is an expected
//! outcome when you're checking data off the wire, not an exceptional one.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::Signature as EcdsaSignature;
use thiserror::Error;

use super::hash::sha256;
use super::keys::{PrivateKey, PublicKey, Signature};
use crate::config::SIGNATURE_LENGTH;

/// Errors during signing.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The key bytes are not a valid secp256k1 scalar.
    #[error("invalid private key: not a valid secp256k1 scalar")]
    InvalidPrivateKey,

    /// The ECDSA backend refused to sign. With a validated key this would
    /// mean RFC 6979 produced an unusable nonce, which it never does.
    #[error("signing backend error: {0}")]
    Backend(String),
}

/// Sign `message` with `private_key`.
///
/// # Example
///
/// ```
/// use ledger_sdk::crypto::{sign, verify, PrivateKey};
///
/// let key = PrivateKey::generate().unwrap();
/// let signature = sign(b"batch header bytes", &key).unwrap();
/// assert!(verify(b"batch header bytes", &signature, &key.public_key()));
/// ```
pub fn sign(message: &[u8], private_key: &PrivateKey) -> Result<Signature, SigningError> {
    let digest = sha256(message);
    let signature: EcdsaSignature = private_key
        .signing_key()
        .sign_prehash(&digest)
        .map_err(|e| SigningError::Backend(e.to_string()))?;

    // Output is always low-S.
    let signature = signature.normalize_s().unwrap_or(signature);

    let mut bytes = [0u8; SIGNATURE_LENGTH];
    bytes.copy_from_slice(&signature.to_bytes());
    Ok(Signature::from_array(bytes))
}

/// Sign with a raw 32-byte private key.
///
/// This is the "I got key bytes from somewhere and don't want to build a
/// `PrivateKey` first" variant. Invalid scalars fail with
/// [`SigningError::InvalidPrivateKey`].
pub fn sign_raw(message: &[u8], private_key_bytes: &[u8]) -> Result<Signature, SigningError> {
    let private_key =
        PrivateKey::from_bytes(private_key_bytes).map_err(|_| SigningError::InvalidPrivateKey)?;
    sign(message, &private_key)
}

/// Verify `signature` over `message` against `public_key`.
///
/// Returns `false` for a wrong key, a wrong message, a signature whose `r`
/// or `s` is out of range, or a high-S signature.
pub fn verify(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = public_key.verifying_key() else {
        return false;
    };
    let Ok(signature) = EcdsaSignature::from_slice(signature.as_bytes()) else {
        return false;
    };
    if signature.normalize_s().is_some() {
        // High-S: valid ECDSA, but never something `sign` would emit.
        return false;
    }

    let digest = sha256(message);
    verifying_key.verify_prehash(&digest, &signature).is_ok()
}

/// Verify using raw byte components straight off the wire.
///
/// Any malformed input (wrong lengths, off-curve key, garbage signature)
/// is simply `false`.
pub fn verify_raw(message: &[u8], signature_bytes: &[u8], public_key_bytes: &[u8]) -> bool {
    let Ok(public_key) = PublicKey::from_bytes(public_key_bytes) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature_bytes) else {
        return false;
    };
    verify(message, &signature, &public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PRIVATE_HEX: &str = "ad8523ac9f1e7a9fdaa42c25ca766b7b099c871e7c0705ae191e0bef22b5d8cb";
    const EXPECTED_SIGNATURE: &str = "ccecded22fb1153d2f45aaf6df8280d3296dd4677b1f711d6a89fc1e81393dda\
                                      5287d81569a6c91b90389c562e60169d036f1f6a66241156c69e364434bcd654";

    fn known_key() -> PrivateKey {
        PrivateKey::from_hex(PRIVATE_HEX).unwrap()
    }

    #[test]
    fn known_signature_vector() {
        let sig = sign(&[0x01, 0x02, 0x03], &known_key()).unwrap();
        assert_eq!(sig.to_hex(), EXPECTED_SIGNATURE);
    }

    #[test]
    fn sign_verify_roundtrip() {
        let key = PrivateKey::generate().unwrap();
        let sig = sign(b"transaction header", &key).unwrap();
        assert!(verify(b"transaction header", &sig, &key.public_key()));
    }

    #[test]
    fn signatures_are_deterministic() {
        let key = known_key();
        let a = sign(b"same bytes", &key).unwrap();
        let b = sign(b"same bytes", &key).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn signatures_are_low_s() {
        // n/2 for secp256k1; the upper half of s must never appear.
        let half_order =
            hex::decode("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..32u8 {
            let key = PrivateKey::generate_with(&mut rng).unwrap();
            let sig = sign(&[i; 17], &key).unwrap();
            assert!(sig.as_bytes()[32..] <= half_order[..], "high-S signature on message {}", i);
        }
    }

    #[test]
    fn wrong_message_fails_verification() {
        let key = known_key();
        let sig = sign(b"correct", &key).unwrap();
        assert!(!verify(b"wrong", &sig, &key.public_key()));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let key = known_key();
        let other = PrivateKey::generate().unwrap();
        let sig = sign(b"message", &key).unwrap();
        assert!(!verify(b"message", &sig, &other.public_key()));
    }

    /// `n - s` over big-endian 32-byte values.
    fn negate_s(s: &[u8]) -> Vec<u8> {
        let order =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap();
        let mut out = vec![0u8; 32];
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut diff = order[i] as i16 - s[i] as i16 - borrow;
            borrow = if diff < 0 { 1 } else { 0 };
            if diff < 0 {
                diff += 256;
            }
            out[i] = diff as u8;
        }
        out
    }

    #[test]
    fn high_s_twin_is_rejected() {
        // (r, n - s) is mathematically valid ECDSA but not canonical.
        let key = known_key();
        let sig = sign(b"malleable?", &key).unwrap();
        let mut twin_bytes = sig.as_bytes().to_vec();
        let high_s = negate_s(&twin_bytes[32..]);
        twin_bytes[32..].copy_from_slice(&high_s);
        let twin = Signature::from_slice(&twin_bytes).unwrap();
        assert_ne!(twin, sig);
        assert!(!verify(b"malleable?", &twin, &key.public_key()));
    }

    #[test]
    fn zero_signature_fails_without_panicking() {
        let key = known_key();
        let zeros = Signature::from_slice(&[0u8; 64]).unwrap();
        assert!(!verify(b"anything", &zeros, &key.public_key()));
    }

    #[test]
    fn verify_raw_rejects_malformed_inputs() {
        let key = known_key();
        let sig = sign(b"msg", &key).unwrap();
        let pk = key.public_key();

        assert!(verify_raw(b"msg", sig.as_bytes(), pk.as_bytes()));
        assert!(!verify_raw(b"msg", &sig.as_bytes()[..63], pk.as_bytes()));
        assert!(!verify_raw(b"msg", sig.as_bytes(), &pk.as_bytes()[..32]));
        assert!(!verify_raw(b"msg", sig.as_bytes(), &[0x02; 33]));
    }

    #[test]
    fn sign_raw_matches_typed_sign() {
        let key = known_key();
        let raw = sign_raw(b"msg", &key.to_bytes()).unwrap();
        let typed = sign(b"msg", &key).unwrap();
        assert_eq!(raw, typed);
    }

    #[test]
    fn sign_raw_rejects_invalid_scalar() {
        assert!(matches!(
            sign_raw(b"msg", &[0u8; 32]),
            Err(SigningError::InvalidPrivateKey)
        ));
        assert!(matches!(
            sign_raw(b"msg", &[1u8; 5]),
            Err(SigningError::InvalidPrivateKey)
        ));
    }

    #[test]
    fn empty_message_signs_and_verifies() {
        let key = known_key();
        let sig = sign(b"", &key).unwrap();
        assert!(verify(b"", &sig, &key.public_key()));
    }
}
