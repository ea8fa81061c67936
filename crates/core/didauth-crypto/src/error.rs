//! Error types for cryptographic operations

use didauth_encoding::EncodingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// Supplied key text or a JWK member could not be decoded
    #[error(transparent)]
    InvalidKeyFormat(#[from] EncodingError),

    /// Signing was attempted with a public-only key
    #[error("No private key available")]
    NoPrivateKey,

    /// Malformed signature bytes and cryptographic mismatches both land here
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Key error: {0}")]
    KeyError(String),

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
