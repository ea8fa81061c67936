//! Error types for document handling and key extraction

use didauth_crypto::CryptoError;
use thiserror::Error;

use crate::resolver::ResolverError;

#[derive(Error, Debug)]
pub enum DocumentKeysError {
    /// Keys were requested before a document was set or resolved
    #[error("No resolved DID document")]
    UnresolvedDocument,

    #[error("Invalid DID document: {0}")]
    InvalidDocument(String),

    #[error("DID document resolution failed: {0}")]
    DocumentResolution(#[from] ResolverError),
}

pub type Result<T> = std::result::Result<T, DocumentKeysError>;

/// Why a single verification method produced no key
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Unsupported verification method type ({0})")]
    UnsupportedType(String),

    #[error("Verification method ({0}) carries no public key material")]
    MissingKeyMaterial(String),

    #[error("Verification method ({id}) has invalid key material: {reason}")]
    InvalidKeyMaterial { id: String, reason: String },

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
