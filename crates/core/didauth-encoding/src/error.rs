//! Encoding errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Invalid PEM encoding: {0}")]
    InvalidPem(String),

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    #[error("Invalid base58 encoding: {0}")]
    InvalidBase58(String),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(String),

    #[error("Invalid multibase prefix: expected 'z' (base58btc), got '{0}'")]
    InvalidMultibasePrefix(char),

    #[error("Invalid multicodec: {0}")]
    InvalidMulticodec(String),
}

pub type Result<T> = std::result::Result<T, EncodingError>;
