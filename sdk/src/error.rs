//! Crate-wide error type.
//!
//! Each module has its own error enum describing exactly what it can get
//! wrong. [`Error`] wraps all of them so callers that don't care which
//! layer failed can use one type with `?`.

use thiserror::Error;

use crate::crypto::encoding::EncodingError;
use crate::crypto::keys::KeyError;
use crate::crypto::signing::SigningError;
use crate::encoder::{ConfigError, EncoderError};
use crate::transaction::verification::VerificationError;
use crate::wire::DecodeError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Encoder(#[from] EncoderError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
