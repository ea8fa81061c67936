//! External key encodings
//!
//! Keys arrive as text in one of four encodings. Each decoder either returns
//! the complete byte string or an error, never a partial result.

use std::{fmt, str::FromStr};

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{EncodingError, error::Result};

/// Accepts both padded and unpadded input, rejects malformed padding
const PADDING_INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const BASE64_STANDARD_LENIENT: GeneralPurpose =
    GeneralPurpose::new(&alphabet::STANDARD, PADDING_INDIFFERENT);

const BASE64_URL_SAFE_LENIENT: GeneralPurpose =
    GeneralPurpose::new(&alphabet::URL_SAFE, PADDING_INDIFFERENT);

/// Encoding of a supplied key string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyFormat {
    #[serde(alias = "pem")]
    Pem,
    #[serde(alias = "hex")]
    Hex,
    #[serde(alias = "base58")]
    Base58,
    #[serde(alias = "base64")]
    Base64,
}

impl FromStr for KeyFormat {
    type Err = EncodingError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            "PEM" => Ok(KeyFormat::Pem),
            "HEX" => Ok(KeyFormat::Hex),
            "BASE58" => Ok(KeyFormat::Base58),
            "BASE64" => Ok(KeyFormat::Base64),
            _ => Err(EncodingError::InvalidKeyFormat(format!(
                "Unknown key format tag ({value})"
            ))),
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KeyFormat::Pem => write!(f, "PEM"),
            KeyFormat::Hex => write!(f, "HEX"),
            KeyFormat::Base58 => write!(f, "BASE58"),
            KeyFormat::Base64 => write!(f, "BASE64"),
        }
    }
}

/// A decoded PEM block
///
/// The label (`RSA PUBLIC KEY`, `PRIVATE KEY`, ...) is kept because it is the
/// only thing that tells PKCS#1 apart from PKCS#8 and public from private.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PemBlock {
    pub label: String,
    pub contents: Vec<u8>,
}

impl PemBlock {
    /// True when the label names private key material
    pub fn is_private(&self) -> bool {
        self.label.ends_with("PRIVATE KEY")
    }
}

/// Decodes `text` according to `format`, returning raw bytes
pub fn decode(text: &str, format: KeyFormat) -> Result<Vec<u8>> {
    match format {
        KeyFormat::Pem => Ok(decode_pem(text)?.contents.clone()),
        KeyFormat::Hex => decode_hex(text),
        KeyFormat::Base58 => decode_base58(text),
        KeyFormat::Base64 => decode_base64(text),
    }
}

/// Parses the first PEM block in `text`
pub fn decode_pem(text: &str) -> Result<PemBlock> {
    let parsed = pem::parse(text.trim()).map_err(|e| EncodingError::InvalidPem(e.to_string()))?;

    Ok(PemBlock {
        label: parsed.tag().to_string(),
        contents: parsed.contents().to_vec(),
    })
}

/// Hexadecimal, optional `0x` prefix, either case
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    hex::decode(digits).map_err(|e| EncodingError::InvalidHex(e.to_string()))
}

/// Base58 using the Bitcoin alphabet
pub fn decode_base58(text: &str) -> Result<Vec<u8>> {
    bs58::decode(text.trim())
        .into_vec()
        .map_err(|e| EncodingError::InvalidBase58(e.to_string()))
}

/// Base64 in either the standard or the URL-safe alphabet, padded or not
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let engine = if text.contains(['-', '_']) {
        &BASE64_URL_SAFE_LENIENT
    } else {
        &BASE64_STANDARD_LENIENT
    };

    engine
        .decode(text)
        .map_err(|e| EncodingError::InvalidBase64(e.to_string()))
}
