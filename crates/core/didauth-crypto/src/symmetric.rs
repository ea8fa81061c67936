//! Shared secret keys (HS256)
//!
//! A symmetric key has no public half, so every instance is private.

use didauth_encoding::{decode_b64url, encode_b64url};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{CryptoError, SymmetricParams, error::Result, key::KeyOps};

type HmacSha256 = Hmac<Sha256>;

/// Length of generated secrets
pub const DEFAULT_SECRET_LENGTH: usize = 32;

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    pub fn generate() -> Self {
        let mut secret = vec![0u8; DEFAULT_SECRET_LENGTH];
        OsRng.fill_bytes(&mut secret);
        SymmetricKey { secret }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CryptoError::KeyError("Symmetric key is empty".into()));
        }

        Ok(SymmetricKey {
            secret: bytes.to_vec(),
        })
    }

    pub fn from_params(params: &SymmetricParams) -> Result<Self> {
        SymmetricKey::from_bytes(&decode_b64url(&params.k)?)
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| CryptoError::KeyError(format!("Couldn't create HMAC: {e}")))
    }
}

impl KeyOps for SymmetricKey {
    type Params = SymmetricParams;

    fn is_private(&self) -> bool {
        true
    }

    fn params(&self) -> Result<SymmetricParams> {
        Ok(SymmetricParams {
            k: encode_b64url(&self.secret),
        })
    }

    fn public_only(&self) -> Result<Self> {
        Err(CryptoError::KeyError(
            "Symmetric keys have no public half".into(),
        ))
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut mac = self.mac()?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        let mut mac = self.mac()?;
        mac.update(message);
        mac.verify_slice(signature).map_err(|e| {
            debug!("HMAC verification failed: {e}");
            CryptoError::InvalidSignature
        })
    }
}

#[cfg(test)]
mod tests {
    use didauth_encoding::decode_hex;

    use super::*;

    const K: &str = "c2VjcmV0LWtleS1tYXRlcmlhbC0zMi1ieXRlcyEhISE";

    fn key() -> SymmetricKey {
        SymmetricKey::from_params(&SymmetricParams { k: K.to_string() }).unwrap()
    }

    #[test]
    fn hmac_sha256_vector() {
        let tag = key().sign(b"hello").unwrap();
        assert_eq!(
            tag,
            decode_hex("f1b26597633de7ee91ea979f4535680e44d505f7fc7cf297eb9fb127fca53e20").unwrap()
        );
        assert!(key().verify(b"hello", &tag).is_ok());
    }

    #[test]
    fn mismatches_are_invalid_signature() {
        let key = key();
        let mut tag = key.sign(b"hello").unwrap();
        assert!(matches!(
            key.verify(b"hellp", &tag),
            Err(CryptoError::InvalidSignature)
        ));
        tag[31] ^= 0x01;
        assert!(matches!(
            key.verify(b"hello", &tag),
            Err(CryptoError::InvalidSignature)
        ));
        assert!(matches!(
            key.verify(b"hello", &tag[..16]),
            Err(CryptoError::InvalidSignature)
        ));
    }

    #[test]
    fn always_private() {
        let key = SymmetricKey::generate();
        assert!(key.is_private());
        assert_eq!(key.params().unwrap().k.len(), 43);
        assert!(key.public_only().is_err());
    }

    #[test]
    fn empty_secret() {
        assert!(SymmetricKey::from_bytes(&[]).is_err());
    }
}
