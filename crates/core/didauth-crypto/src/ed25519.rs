//! Ed25519 key operations (EdDSA)

use didauth_encoding::{PemBlock, decode_b64url, encode_b64url};
use ed25519_dalek::{
    Signature, Signer, SigningKey, Verifier, VerifyingKey,
    pkcs8::{DecodePrivateKey, DecodePublicKey},
};
use rand::rngs::OsRng;
use tracing::debug;

use crate::{CryptoError, EncodingError, OctectParams, error::Result, key::KeyOps};

pub const CURVE: &str = "Ed25519";

/// An Ed25519 key. The private half is only held when it was supplied.
#[derive(Clone)]
pub struct Ed25519Key {
    verifying_key: VerifyingKey,
    signing_key: Option<SigningKey>,
}

impl Ed25519Key {
    fn from_signing_key(signing_key: SigningKey) -> Self {
        Ed25519Key {
            verifying_key: signing_key.verifying_key(),
            signing_key: Some(signing_key),
        }
    }

    /// Generates a random private key
    pub fn generate() -> Self {
        Ed25519Key::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Imports a raw 32 byte public key
    pub fn from_public_bytes(bytes: &[u8]) -> Result<Self> {
        let verifying_key = VerifyingKey::try_from(bytes).map_err(|e| {
            CryptoError::KeyError(format!("Couldn't create ED25519 VerifyingKey: {e}"))
        })?;

        Ok(Ed25519Key {
            verifying_key,
            signing_key: None,
        })
    }

    /// Imports a 32 byte seed or a 64 byte `seed || public` secret key
    pub fn from_private_bytes(bytes: &[u8]) -> Result<Self> {
        let signing_key = match bytes.len() {
            32 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(bytes);
                SigningKey::from_bytes(&seed)
            }
            64 => {
                let mut keypair = [0u8; 64];
                keypair.copy_from_slice(bytes);
                SigningKey::from_keypair_bytes(&keypair).map_err(|e| {
                    CryptoError::KeyError(format!("ED25519 keypair bytes aren't consistent: {e}"))
                })?
            }
            length => {
                return Err(CryptoError::KeyError(format!(
                    "ED25519 private key must be 32 or 64 bytes, got {length}"
                )));
            }
        };

        Ok(Ed25519Key::from_signing_key(signing_key))
    }

    /// Imports JWK members. `d`, when present, must match `x`.
    pub fn from_params(params: &OctectParams) -> Result<Self> {
        if params.curve != CURVE {
            return Err(CryptoError::UnsupportedKeyType(format!(
                "OKP curve ({})",
                params.curve
            )));
        }

        let public = Ed25519Key::from_public_bytes(&decode_b64url(&params.x)?)?;

        let Some(d) = &params.d else {
            return Ok(public);
        };

        let seed = decode_b64url(d)?;
        if seed.len() != 32 {
            return Err(CryptoError::KeyError(format!(
                "ED25519 private key must be 32 bytes, got {}",
                seed.len()
            )));
        }

        let private = Ed25519Key::from_private_bytes(&seed)?;
        if private.verifying_key != public.verifying_key {
            return Err(CryptoError::KeyError(
                "ED25519 private key does not match its public key".into(),
            ));
        }

        Ok(private)
    }

    /// Imports SPKI or PKCS#8 PEM contents
    pub(crate) fn from_pem_block(block: &PemBlock, private: bool) -> Result<Self> {
        let der = block.contents.as_slice();
        let key = match block.label.as_str() {
            "PUBLIC KEY" => Ed25519Key {
                verifying_key: VerifyingKey::from_public_key_der(der)
                    .map_err(|e| invalid_der("SPKI", e))?,
                signing_key: None,
            },
            "PRIVATE KEY" => Ed25519Key::from_signing_key(
                SigningKey::from_pkcs8_der(der).map_err(|e| invalid_der("PKCS#8", e))?,
            ),
            label => {
                return Err(EncodingError::InvalidPem(format!(
                    "Unexpected PEM label for an ED25519 key ({label})"
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

    /// Raw 32 byte public key, as carried by multikeys
    pub fn to_public_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }
}

impl KeyOps for Ed25519Key {
    type Params = OctectParams;

    fn is_private(&self) -> bool {
        self.signing_key.is_some()
    }

    fn params(&self) -> Result<OctectParams> {
        Ok(OctectParams {
            curve: CURVE.to_string(),
            x: encode_b64url(self.verifying_key.as_bytes()),
            d: self
                .signing_key
                .as_ref()
                .map(|signing_key| encode_b64url(signing_key.as_bytes())),
        })
    }

    fn public_only(&self) -> Result<Self> {
        Ok(Ed25519Key {
            verifying_key: self.verifying_key,
            signing_key: None,
        })
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let Some(signing_key) = &self.signing_key else {
            return Err(CryptoError::NoPrivateKey);
        };

        Ok(signing_key.sign(message).to_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        let signature = Signature::from_slice(signature).map_err(|e| {
            debug!("Malformed ED25519 signature: {e}");
            CryptoError::InvalidSignature
        })?;

        self.verifying_key.verify(message, &signature).map_err(|e| {
            debug!("ED25519 signature verification failed: {e}");
            CryptoError::InvalidSignature
        })
    }
}

fn invalid_der(kind: &str, error: impl std::fmt::Display) -> CryptoError {
    EncodingError::InvalidKeyFormat(format!("Couldn't parse {kind} ED25519 key: {error}")).into()
}
