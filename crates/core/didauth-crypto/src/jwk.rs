//! JWK (JSON Web Key) types per RFC 7517
//!
//! This is the canonical interchange form of every key. Numeric members are
//! base64url encoded big-endian unsigned integers without padding; private
//! members are only present on private keys.

use didauth_encoding::encode_b64url;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Algorithm, CryptoError, KeyType, KeyUse};

/// RFC 7517 JWK Struct
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct JWK {
    #[serde(rename = "kid")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key_id: Option<String>,

    #[serde(rename = "use")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[zeroize(skip)]
    pub key_use: Option<KeyUse>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[zeroize(skip)]
    pub alg: Option<Algorithm>,

    #[serde(flatten)]
    pub params: Params,
}

impl JWK {
    /// Returns the KeyType for a JWK
    pub fn key_type(&self) -> KeyType {
        match &self.params {
            Params::RSA(_) => KeyType::Rsa,
            Params::EC(_) => KeyType::Ec,
            Params::OKP(_) => KeyType::Okp,
            Params::Oct(_) => KeyType::Symmetric,
        }
    }

    /// True when any private member is present
    pub fn is_private(&self) -> bool {
        match &self.params {
            Params::RSA(params) => params.d.is_some(),
            Params::EC(params) => params.d.is_some(),
            Params::OKP(params) => params.d.is_some(),
            Params::Oct(_) => true,
        }
    }

    /// RFC 7638 thumbprint (SHA-256, base64url)
    ///
    /// Only the required public members take part, so a private key and its
    /// public half share a thumbprint.
    pub fn thumbprint(&self) -> Result<String, CryptoError> {
        let canonical = match &self.params {
            Params::RSA(params) => format!(
                r#"{{"e":{},"kty":"RSA","n":{}}}"#,
                json_string(&params.e)?,
                json_string(&params.n)?
            ),
            Params::EC(params) => format!(
                r#"{{"crv":{},"kty":"EC","x":{},"y":{}}}"#,
                json_string(&params.curve)?,
                json_string(&params.x)?,
                json_string(&params.y)?
            ),
            Params::OKP(params) => format!(
                r#"{{"crv":{},"kty":"OKP","x":{}}}"#,
                json_string(&params.curve)?,
                json_string(&params.x)?
            ),
            Params::Oct(params) => {
                format!(r#"{{"k":{},"kty":"oct"}}"#, json_string(&params.k)?)
            }
        };

        Ok(encode_b64url(&Sha256::digest(canonical.as_bytes())))
    }
}

fn json_string(value: &str) -> Result<String, CryptoError> {
    serde_json::to_string(value)
        .map_err(|e| CryptoError::KeyError(format!("Couldn't serialize JWK member: {e}")))
}

/// JWK Key Types and associated Parameters
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
#[serde(tag = "kty")]
pub enum Params {
    RSA(RsaParams),
    EC(ECParams),
    OKP(OctectParams),
    /// [`KeyType::Symmetric`], written as `oct`
    #[serde(rename = "oct", alias = "Symmetric")]
    Oct(SymmetricParams),
}

/// RSA parameters. CRT members travel with `d`.
#[derive(Debug, Serialize, Deserialize, Clone, Zeroize, PartialEq, ZeroizeOnDrop)]
pub struct RsaParams {
    pub n: String,
    pub e: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
}

/// Elliptic Curve parameters (secp256k1)
#[derive(Debug, Serialize, Deserialize, Clone, Zeroize, PartialEq, ZeroizeOnDrop)]
pub struct ECParams {
    #[serde(rename = "crv")]
    pub curve: String,
    pub x: String,
    pub y: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

/// Octet Key Pair parameters (Ed25519)
#[derive(Debug, Serialize, Deserialize, Clone, Zeroize, PartialEq, ZeroizeOnDrop)]
pub struct OctectParams {
    #[serde(rename = "crv")]
    pub curve: String,
    pub x: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

/// Symmetric key parameters
#[derive(Debug, Serialize, Deserialize, Clone, Zeroize, PartialEq, ZeroizeOnDrop)]
pub struct SymmetricParams {
    pub k: String,
}
