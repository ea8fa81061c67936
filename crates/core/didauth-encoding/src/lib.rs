//! Key material codecs for DID authentication
//!
//! This crate turns externally supplied key text into raw bytes and back:
//! - PEM, hexadecimal, base58 (Bitcoin alphabet) and base64/base64url decoding
//! - Canonical base64url (no padding) big-endian unsigned integer fields for JWKs
//! - Multibase (base58btc) and multicodec prefixes used by `Multikey` methods

pub mod format;
pub mod multibase;
pub mod multicodec;
pub mod uint;

pub use format::{KeyFormat, PemBlock, decode, decode_base58, decode_base64, decode_hex, decode_pem};
pub use multibase::{BASE58BTC_PREFIX, decode_base58btc, decode_multikey, encode_base58btc, encode_multikey};
pub use multicodec::{Codec, ED25519_PUB, RSA_PUB, SECP256K1_PUB};
pub use uint::{decode_b64url, decode_uint, encode_b64url, encode_uint};

mod error;
pub use error::EncodingError;
