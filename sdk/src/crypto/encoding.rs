//! Text encodings for raw byte buffers.
//!
//! Keys, signatures and digests travel through headers as lowercase hex.
//! The decoder is strict: it accepts exactly the alphabet the
//! encoder produces and nothing else. Accepting `"ABCD"` today and emitting
//! `"abcd"` tomorrow is how two parties end up signing different bytes for
//! the "same" header.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::HEX_ENCODING_NAME;

/// Errors produced while decoding text into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Hex needs two characters per byte.
    #[error("odd-length input: {length} characters")]
    OddLength { length: usize },

    /// A character outside the lowercase hex alphabet `[0-9a-f]`.
    #[error("invalid character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },

    /// The requested encoding name is not one we speak.
    #[error("unsupported encoding format: {0}")]
    UnsupportedFormat(String),
}

/// A text encoding for byte buffers.
///
/// Only hex exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Encoding {
    /// Lowercase, zero-padded hexadecimal.
    #[default]
    Hex,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => write!(f, "{}", HEX_ENCODING_NAME),
        }
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            HEX_ENCODING_NAME => Ok(Self::Hex),
            other => Err(EncodingError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Encode `bytes` as text in the given format.
///
/// # Example
///
/// ```
/// use ledger_sdk::crypto::{encode, Encoding};
///
/// assert_eq!(encode(&[0x00, 0x0f, 0xab], Encoding::Hex), "000fab");
/// ```
pub fn encode(bytes: &[u8], format: Encoding) -> String {
    match format {
        Encoding::Hex => hex::encode(bytes),
    }
}

/// Decode text produced by [`encode`] back into bytes.
///
/// Fails on odd length or on any character outside `[0-9a-f]`. Uppercase
/// hex is rejected on purpose.
pub fn decode(text: &str, format: Encoding) -> Result<Vec<u8>, EncodingError> {
    match format {
        Encoding::Hex => decode_hex(text),
    }
}

fn decode_hex(text: &str) -> Result<Vec<u8>, EncodingError> {
    if let Some((index, character)) = text
        .char_indices()
        .find(|&(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(EncodingError::InvalidCharacter { character, index });
    }

    if text.len() % 2 != 0 {
        return Err(EncodingError::OddLength { length: text.len() });
    }

    // Input is now even-length lowercase hex.
    hex::decode(text).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => EncodingError::InvalidCharacter {
            character: c,
            index,
        },
        _ => EncodingError::OddLength { length: text.len() },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase_and_zero_padded() {
        assert_eq!(encode(&[0x01, 0xAB, 0xFF], Encoding::Hex), "01abff");
        assert_eq!(encode(&[], Encoding::Hex), "");
    }

    #[test]
    fn hex_roundtrip_all_byte_values() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        let text = encode(&bytes, Encoding::Hex);
        assert_eq!(decode(&text, Encoding::Hex).unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_odd_length() {
        assert_eq!(
            decode("abc", Encoding::Hex),
            Err(EncodingError::OddLength { length: 3 })
        );
    }

    #[test]
    fn decode_rejects_non_hex_characters() {
        assert_eq!(
            decode("zz", Encoding::Hex),
            Err(EncodingError::InvalidCharacter {
                character: 'z',
                index: 0
            })
        );
    }

    #[test]
    fn decode_rejects_uppercase() {
        // Encode never emits uppercase, so decode doesn't accept it.
        assert!(matches!(
            decode("0A", Encoding::Hex),
            Err(EncodingError::InvalidCharacter { character: 'A', index: 1 })
        ));
    }

    #[test]
    fn decode_reports_first_bad_character() {
        assert!(matches!(
            decode("00ff0g", Encoding::Hex),
            Err(EncodingError::InvalidCharacter { index: 5, .. })
        ));
    }

    #[test]
    fn decode_empty_string() {
        assert_eq!(decode("", Encoding::Hex).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn encoding_parses_from_name() {
        assert_eq!("hex".parse::<Encoding>().unwrap(), Encoding::Hex);
        assert_eq!(Encoding::Hex.to_string(), "hex");
        assert!(matches!(
            "base64".parse::<Encoding>(),
            Err(EncodingError::UnsupportedFormat(name)) if name == "base64"
        ));
    }
}
