//! secp256k1 key operations (ES256K)

use didauth_encoding::{PemBlock, decode_b64url, encode_b64url};
use k256::{
    PublicKey, SecretKey,
    ecdsa::{
        Signature, SigningKey, VerifyingKey,
        signature::hazmat::{PrehashSigner, PrehashVerifier},
    },
    elliptic_curve::sec1::ToEncodedPoint,
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{CryptoError, ECParams, EncodingError, error::Result, key::KeyOps};

pub const CURVE: &str = "secp256k1";

/// Fixed-width `r || s` signature length
pub const SIGNATURE_LENGTH: usize = 64;

/// A secp256k1 key. The private half is only held when it was supplied.
#[derive(Clone)]
pub struct Secp256k1Key {
    verifying_key: VerifyingKey,
    signing_key: Option<SigningKey>,
}

impl Secp256k1Key {
    fn from_signing_key(signing_key: SigningKey) -> Self {
        Secp256k1Key {
            verifying_key: VerifyingKey::from(&signing_key),
            signing_key: Some(signing_key),
        }
    }

    /// Generates a random private key
    pub fn generate() -> Self {
        Secp256k1Key::from_signing_key(SigningKey::random(&mut OsRng))
    }

    /// Imports a curve point: 65 byte uncompressed, 33 byte compressed, or 64 byte `x || y`
    pub fn from_public_bytes(bytes: &[u8]) -> Result<Self> {
        let verifying_key = if bytes.len() == 64 {
            let mut point = Vec::with_capacity(65);
            point.push(0x04);
            point.extend_from_slice(bytes);
            VerifyingKey::from_sec1_bytes(&point)
        } else {
            VerifyingKey::from_sec1_bytes(bytes)
        }
        .map_err(|e| CryptoError::KeyError(format!("secp256k1 public key isn't valid: {e}")))?;

        Ok(Secp256k1Key {
            verifying_key,
            signing_key: None,
        })
    }

    /// Imports a 32 byte private scalar. The public point is derived from it.
    pub fn from_private_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(CryptoError::KeyError(format!(
                "secp256k1 private key must be 32 bytes, got {}",
                bytes.len()
            )));
        }

        let signing_key = SigningKey::from_slice(bytes).map_err(|e| {
            CryptoError::KeyError(format!("secp256k1 secret material isn't valid: {e}"))
        })?;

        Ok(Secp256k1Key::from_signing_key(signing_key))
    }

    /// Imports JWK members. `d`, when present, must match `x` and `y`.
    pub fn from_params(params: &ECParams) -> Result<Self> {
        if params.curve != CURVE {
            return Err(CryptoError::UnsupportedKeyType(format!(
                "EC curve ({})",
                params.curve
            )));
        }

        let x = decode_b64url(&params.x)?;
        let y = decode_b64url(&params.y)?;
        if x.len() != 32 || y.len() != 32 {
            return Err(CryptoError::KeyError(
                "secp256k1 coordinates must be 32 bytes each".into(),
            ));
        }

        let mut point = Vec::with_capacity(64);
        point.extend_from_slice(&x);
        point.extend_from_slice(&y);
        let public = Secp256k1Key::from_public_bytes(&point)?;

        let Some(d) = &params.d else {
            return Ok(public);
        };

        let private = Secp256k1Key::from_private_bytes(&decode_b64url(d)?)?;
        if private.verifying_key != public.verifying_key {
            return Err(CryptoError::KeyError(
                "secp256k1 private key does not match its public point".into(),
            ));
        }

        Ok(private)
    }

    /// Imports SPKI, PKCS#8 or SEC1 (`EC PRIVATE KEY`) PEM contents
    pub(crate) fn from_pem_block(block: &PemBlock, private: bool) -> Result<Self> {
        let der = block.contents.as_slice();
        let key = match block.label.as_str() {
            "PUBLIC KEY" => {
                let public = PublicKey::from_public_key_der(der).map_err(|e| invalid_der("SPKI", e))?;
                Secp256k1Key {
                    verifying_key: VerifyingKey::from(public),
                    signing_key: None,
                }
            }
            "PRIVATE KEY" => {
                let secret = SecretKey::from_pkcs8_der(der).map_err(|e| invalid_der("PKCS#8", e))?;
                Secp256k1Key::from_signing_key(SigningKey::from(secret))
            }
            "EC PRIVATE KEY" => {
                let secret = SecretKey::from_sec1_der(der).map_err(|e| invalid_der("SEC1", e))?;
                Secp256k1Key::from_signing_key(SigningKey::from(secret))
            }
            label => {
                return Err(EncodingError::InvalidPem(format!(
                    "Unexpected PEM label for a secp256k1 key ({label})"
                ))
                .into());
            }
        };

        match (private, key.is_private()) {
            (true, false) => Err(CryptoError::NoPrivateKey),
            (false, true) => key.public_only(),
            _ => Ok(key),
        }
    }

    /// SEC1 compressed point, as carried by multikeys
    pub fn to_compressed_bytes(&self) -> Vec<u8> {
        self.verifying_key.to_encoded_point(true).as_bytes().to_vec()
    }
}

impl KeyOps for Secp256k1Key {
    type Params = ECParams;

    fn is_private(&self) -> bool {
        self.signing_key.is_some()
    }

    fn params(&self) -> Result<ECParams> {
        let point = self.verifying_key.to_encoded_point(false);

        Ok(ECParams {
            curve: CURVE.to_string(),
            x: encode_b64url(
                point
                    .x()
                    .ok_or_else(|| CryptoError::KeyError("Couldn't get X coordinate".into()))?
                    .as_slice(),
            ),
            y: encode_b64url(
                point
                    .y()
                    .ok_or_else(|| CryptoError::KeyError("Couldn't get Y coordinate".into()))?
                    .as_slice(),
            ),
            d: self
                .signing_key
                .as_ref()
                .map(|signing_key| encode_b64url(&signing_key.to_bytes())),
        })
    }

    fn public_only(&self) -> Result<Self> {
        Ok(Secp256k1Key {
            verifying_key: self.verifying_key.clone(),
            signing_key: None,
        })
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let Some(signing_key) = &self.signing_key else {
            return Err(CryptoError::NoPrivateKey);
        };

        let digest = Sha256::digest(message);
        let signature: Signature = signing_key
            .sign_prehash(&digest)
            .map_err(|e| CryptoError::KeyError(format!("secp256k1 signing failed: {e}")))?;

        // r and s are already left-padded to 32 bytes each
        let (r, s) = signature.split_bytes();
        let mut output = Vec::with_capacity(SIGNATURE_LENGTH);
        output.extend_from_slice(&r);
        output.extend_from_slice(&s);
        Ok(output)
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        if signature.len() != SIGNATURE_LENGTH {
            debug!(
                "secp256k1 signature has {} bytes, expected {SIGNATURE_LENGTH}",
                signature.len()
            );
            return Err(CryptoError::InvalidSignature);
        }

        let signature = Signature::from_slice(signature).map_err(|e| {
            debug!("Malformed secp256k1 signature: {e}");
            CryptoError::InvalidSignature
        })?;
        // The verifier only accepts low-S signatures
        let signature = signature.normalize_s().unwrap_or(signature);

        let digest = Sha256::digest(message);
        self.verifying_key
            .verify_prehash(&digest, &signature)
            .map_err(|e| {
                debug!("secp256k1 signature verification failed: {e}");
                CryptoError::InvalidSignature
            })
    }
}

fn invalid_der(kind: &str, error: impl std::fmt::Display) -> CryptoError {
    EncodingError::InvalidKeyFormat(format!("Couldn't parse {kind} secp256k1 key: {error}")).into()
}
