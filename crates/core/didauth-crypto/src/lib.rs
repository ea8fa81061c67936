//! Canonical keys for DID authentication
//!
//! Keys of every supported family (RSA, secp256k1, Ed25519 and shared secret
//! HMAC keys) are normalized into a [`CryptoKey`] whose interchange form is an
//! RFC 7517 [`JWK`]. A key can be built from a JWK, from encoded key text
//! ([`EncodedKey`]) or from a multikey, and then used to sign and verify.
//!
//! ```
//! use didauth_crypto::{CryptoKey, KeyType};
//!
//! let key = CryptoKey::generate(KeyType::Okp)?.with_kid("did:example:alice#key-1");
//! let signature = key.sign(b"challenge")?;
//! key.to_public()?.verify(b"challenge", &signature)?;
//! # Ok::<(), didauth_crypto::CryptoError>(())
//! ```

mod encoded;
mod error;
mod jwk;
mod key;
mod key_type;

pub mod ed25519;
pub mod rsa;
pub mod secp256k1;
pub mod symmetric;

pub use didauth_encoding::{EncodingError, KeyFormat};
pub use encoded::EncodedKey;
pub use error::CryptoError;
pub use jwk::{ECParams, JWK, OctectParams, Params, RsaParams, SymmetricParams};
pub use key::{CryptoKey, KeyMaterial, KeyOps};
pub use key_type::{Algorithm, KeyType, KeyUse};
pub use crate::rsa::PemFormat;
