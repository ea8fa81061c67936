//! Key type, algorithm and key use tags

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CryptoError;

/// Key families (the JWK `kty` member)
///
/// Symmetric keys are written as `oct`, the RFC 7518 name, so exported JWKs
/// and their thumbprints stay readable by other JOSE libraries. `Symmetric`
/// is accepted when reading.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum KeyType {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "EC")]
    Ec,
    #[serde(rename = "OKP")]
    Okp,
    #[serde(rename = "oct", alias = "Symmetric")]
    Symmetric,
}

impl KeyType {
    /// The signing algorithm implied by this key type
    pub fn algorithm(&self) -> Algorithm {
        match self {
            KeyType::Rsa => Algorithm::RS256,
            KeyType::Ec => Algorithm::ES256K,
            KeyType::Okp => Algorithm::EdDSA,
            KeyType::Symmetric => Algorithm::HS256,
        }
    }
}

impl TryFrom<&str> for KeyType {
    type Error = CryptoError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "RSA" => Ok(KeyType::Rsa),
            "EC" => Ok(KeyType::Ec),
            "OKP" => Ok(KeyType::Okp),
            "oct" | "Symmetric" => Ok(KeyType::Symmetric),
            _ => Err(CryptoError::UnsupportedKeyType(value.to_string())),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyType::Rsa => write!(f, "RSA"),
            KeyType::Ec => write!(f, "EC"),
            KeyType::Okp => write!(f, "OKP"),
            KeyType::Symmetric => write!(f, "oct"),
        }
    }
}

/// JWS algorithm (the JWK `alg` member)
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Algorithm {
    RS256,
    ES256K,
    EdDSA,
    HS256,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::RS256 => write!(f, "RS256"),
            Algorithm::ES256K => write!(f, "ES256K"),
            Algorithm::EdDSA => write!(f, "EdDSA"),
            Algorithm::HS256 => write!(f, "HS256"),
        }
    }
}

/// Intended key use (the JWK `use` member). Advisory only.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum KeyUse {
    #[default]
    #[serde(rename = "sig")]
    Signature,
    #[serde(rename = "enc")]
    Encryption,
}
