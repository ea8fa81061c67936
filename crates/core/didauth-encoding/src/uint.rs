//! Canonical JWK field encoding
//!
//! JWK numeric members are base64url (no padding) of a big-endian unsigned
//! integer in its minimal form. Big-integer engines may hand back a leading
//! zero "sign" byte for values whose top bit is set; that byte is stripped
//! before encoding.

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    prelude::BASE64_URL_SAFE_NO_PAD,
};

use crate::{EncodingError, error::Result};

/// base64url decoding that tolerates trailing padding
const BASE64_URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Strips leading zero bytes, keeping a single zero for the value zero
fn minimal(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|b| *b != 0) {
        Some(start) => &bytes[start..],
        None if bytes.is_empty() => bytes,
        None => &bytes[bytes.len() - 1..],
    }
}

/// Encodes a big-endian unsigned integer as a canonical JWK member
pub fn encode_uint(bytes: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(minimal(bytes))
}

/// Decodes a JWK integer member to its big-endian bytes
pub fn decode_uint(text: &str) -> Result<Vec<u8>> {
    let bytes = decode_b64url(text)?;
    if bytes.is_empty() {
        return Err(EncodingError::InvalidBase64(
            "Integer member is empty".to_string(),
        ));
    }
    Ok(bytes)
}

/// Encodes a fixed-width byte string (curve coordinates, scalars, seeds)
pub fn encode_b64url(bytes: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes a base64url member, padding optional
pub fn decode_b64url(text: &str) -> Result<Vec<u8>> {
    BASE64_URL_SAFE_LENIENT
        .decode(text)
        .map_err(|e| EncodingError::InvalidBase64(e.to_string()))
}
