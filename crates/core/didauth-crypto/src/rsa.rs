//! RSA key operations (RS256)
//!
//! Keys are imported from PEM (PKCS#1 or PKCS#8, public or private), DER, or
//! canonical JWK members. Signatures are RSASSA-PKCS1-v1_5 over SHA-256.

use didauth_encoding::{PemBlock, decode_pem, decode_uint, encode_uint};
use rand::rngs::OsRng;
use rsa::{
    BigUint, RsaPrivateKey, RsaPublicKey,
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey},
    pkcs1v15::{Signature, SigningKey, VerifyingKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding},
    signature::{SignatureEncoding, Signer, Verifier},
    traits::{PrivateKeyParts, PublicKeyParts},
};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

use crate::{CryptoError, EncodingError, RsaParams, error::Result, key::KeyOps};

/// Default modulus size for generated keys
pub const DEFAULT_MODULUS_BITS: usize = 2048;

/// PEM container format for RSA export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PemFormat {
    /// `RSA PUBLIC KEY` / `RSA PRIVATE KEY`
    Pkcs1,
    /// `PUBLIC KEY` (SPKI) / `PRIVATE KEY`
    Pkcs8,
}

/// An RSA key. The private half is only held when it was supplied.
#[derive(Clone)]
pub struct RsaKey {
    public: RsaPublicKey,
    private: Option<RsaPrivateKey>,
}

impl RsaKey {
    fn from_private(mut private: RsaPrivateKey) -> Result<Self> {
        private
            .precompute()
            .map_err(|e| CryptoError::KeyError(format!("Couldn't derive RSA CRT values: {e}")))?;

        Ok(RsaKey {
            public: private.to_public_key(),
            private: Some(private),
        })
    }

    fn from_public(public: RsaPublicKey) -> Self {
        RsaKey {
            public,
            private: None,
        }
    }

    /// Generates a new private key
    pub fn generate(bits: usize) -> Result<Self> {
        let private = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| CryptoError::KeyError(format!("Couldn't generate RSA key: {e}")))?;
        RsaKey::from_private(private)
    }

    /// Imports canonical JWK members. `d`, `p` and `q` together make a private key.
    pub fn from_params(params: &RsaParams) -> Result<Self> {
        let n = uint(&params.n)?;
        let e = uint(&params.e)?;

        match (&params.d, &params.p, &params.q) {
            (Some(d), Some(p), Some(q)) => {
                let private =
                    RsaPrivateKey::from_components(n, e, uint(d)?, vec![uint(p)?, uint(q)?])
                        .map_err(|e| {
                            CryptoError::KeyError(format!("RSA private key isn't valid: {e}"))
                        })?;
                private.validate().map_err(|e| {
                    CryptoError::KeyError(format!("RSA private key isn't consistent: {e}"))
                })?;
                RsaKey::from_private(private)
            }
            (None, None, None) => {
                let public = RsaPublicKey::new(n, e)
                    .map_err(|e| CryptoError::KeyError(format!("RSA public key isn't valid: {e}")))?;
                Ok(RsaKey::from_public(public))
            }
            _ => Err(CryptoError::KeyError(
                "RSA private key requires d, p and q".into(),
            )),
        }
    }

    /// Imports a PEM document. The label decides between PKCS#1 and PKCS#8.
    ///
    /// `private` selects the constructor path: a private PEM imported as public
    /// keeps only the public half, a public PEM imported as private fails.
    pub fn from_pem(text: &str, private: bool) -> Result<Self> {
        let block = decode_pem(text)?;
        RsaKey::from_pem_block(&block, private)
    }

    pub(crate) fn from_pem_block(block: &PemBlock, private: bool) -> Result<Self> {
        let der = block.contents.as_slice();
        let key = match block.label.as_str() {
            "RSA PUBLIC KEY" => RsaKey::from_public(
                RsaPublicKey::from_pkcs1_der(der).map_err(|e| invalid_der("PKCS#1", e))?,
            ),
            "PUBLIC KEY" => RsaKey::from_public(
                RsaPublicKey::from_public_key_der(der).map_err(|e| invalid_der("SPKI", e))?,
            ),
            "RSA PRIVATE KEY" => RsaKey::from_private(
                RsaPrivateKey::from_pkcs1_der(der).map_err(|e| invalid_der("PKCS#1", e))?,
            )?,
            "PRIVATE KEY" => RsaKey::from_private(
                RsaPrivateKey::from_pkcs8_der(der).map_err(|e| invalid_der("PKCS#8", e))?,
            )?,
            label => {
                return Err(EncodingError::InvalidPem(format!(
                    "Unexpected PEM label for an RSA key ({label})"
                ))
                .into());
            }
        };

        RsaKey::select(key, private)
    }

    /// Imports raw DER bytes in any of the four PKCS#1 / PKCS#8 shapes
    pub fn from_der(der: &[u8], private: bool) -> Result<Self> {
        let key = if let Ok(key) = RsaPrivateKey::from_pkcs1_der(der) {
            RsaKey::from_private(key)?
        } else if let Ok(key) = RsaPrivateKey::from_pkcs8_der(der) {
            RsaKey::from_private(key)?
        } else if let Ok(key) = RsaPublicKey::from_pkcs1_der(der) {
            RsaKey::from_public(key)
        } else if let Ok(key) = RsaPublicKey::from_public_key_der(der) {
            RsaKey::from_public(key)
        } else {
            return Err(EncodingError::InvalidKeyFormat(
                "Bytes are not a PKCS#1 or PKCS#8 RSA key".into(),
            )
            .into());
        };

        RsaKey::select(key, private)
    }

    fn select(key: RsaKey, private: bool) -> Result<Self> {
        match (private, key.private.is_some()) {
            (true, false) => Err(CryptoError::NoPrivateKey),
            (false, true) => key.public_only(),
            _ => Ok(key),
        }
    }

    /// Exports as PEM. Private keys export private documents.
    pub fn to_pem(&self, format: PemFormat) -> Result<String> {
        let pem = match (&self.private, format) {
            (Some(private), PemFormat::Pkcs1) => private
                .to_pkcs1_pem(LineEnding::LF)
                .map_err(|e| pem_export_error("PKCS#1 private", e))?
                .to_string(),
            (Some(private), PemFormat::Pkcs8) => private
                .to_pkcs8_pem(LineEnding::LF)
                .map_err(|e| pem_export_error("PKCS#8 private", e))?
                .to_string(),
            (None, PemFormat::Pkcs1) => self
                .public
                .to_pkcs1_pem(LineEnding::LF)
                .map_err(|e| pem_export_error("PKCS#1 public", e))?,
            (None, PemFormat::Pkcs8) => self
                .public
                .to_public_key_pem(LineEnding::LF)
                .map_err(|e| pem_export_error("SPKI public", e))?,
        };

        Ok(pem)
    }

    /// Modulus length in bytes, which is also the signature length
    pub fn size(&self) -> usize {
        self.public.size()
    }
}

impl KeyOps for RsaKey {
    type Params = RsaParams;

    fn is_private(&self) -> bool {
        self.private.is_some()
    }

    fn params(&self) -> Result<RsaParams> {
        let mut params = RsaParams {
            n: encode_uint(&self.public.n().to_bytes_be()),
            e: encode_uint(&self.public.e().to_bytes_be()),
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
        };

        if let Some(private) = &self.private {
            let [p, q] = private.primes() else {
                return Err(CryptoError::KeyError(format!(
                    "Expected two RSA primes, found {}",
                    private.primes().len()
                )));
            };
            let (Some(dp), Some(dq), Some(qi)) = (private.dp(), private.dq(), private.qinv())
            else {
                return Err(CryptoError::KeyError("RSA CRT values are missing".into()));
            };
            // qinv is a signed integer in the engine; it is positive after precompute
            let (_, qi) = qi.to_bytes_be();

            params.d = Some(encode_uint(&private.d().to_bytes_be()));
            params.p = Some(encode_uint(&p.to_bytes_be()));
            params.q = Some(encode_uint(&q.to_bytes_be()));
            params.dp = Some(encode_uint(&dp.to_bytes_be()));
            params.dq = Some(encode_uint(&dq.to_bytes_be()));
            params.qi = Some(encode_uint(&qi));
        }

        Ok(params)
    }

    fn public_only(&self) -> Result<Self> {
        Ok(RsaKey::from_public(self.public.clone()))
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let Some(private) = &self.private else {
            return Err(CryptoError::NoPrivateKey);
        };

        let signing_key = SigningKey::<Sha256>::new(private.clone());
        let signature = signing_key
            .try_sign(message)
            .map_err(|e| CryptoError::KeyError(format!("RSA signing failed: {e}")))?;

        Ok(signature.to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        let signature = Signature::try_from(signature).map_err(|e| {
            debug!("Malformed RSA signature: {e}");
            CryptoError::InvalidSignature
        })?;

        VerifyingKey::<Sha256>::new(self.public.clone())
            .verify(message, &signature)
            .map_err(|e| {
                debug!("RSA signature verification failed: {e}");
                CryptoError::InvalidSignature
            })
    }
}

fn uint(member: &str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(&decode_uint(member)?))
}

fn invalid_der(kind: &str, error: impl std::fmt::Display) -> CryptoError {
    EncodingError::InvalidKeyFormat(format!("Couldn't parse {kind} RSA key: {error}")).into()
}

fn pem_export_error(kind: &str, error: impl std::fmt::Display) -> CryptoError {
    CryptoError::KeyError(format!("Couldn't export {kind} PEM: {error}"))
}
