//! `publicKeyMultibase` values
//!
//! Verification methods carry multikeys as a multibase string: a one
//! character base tag followed by the encoded bytes. Key material is always
//! base58btc, tagged `z`; other bases are refused.
//!
//! See: <https://github.com/multiformats/multibase>

use crate::{Codec, EncodingError, error::Result};

/// Base tag of base58btc
pub const BASE58BTC_PREFIX: char = 'z';

/// Strips the `z` tag and decodes the base58btc remainder
pub fn decode_base58btc(text: &str) -> Result<Vec<u8>> {
    let Some(body) = text.strip_prefix(BASE58BTC_PREFIX) else {
        return Err(EncodingError::InvalidMultibasePrefix(
            text.chars().next().unwrap_or('\0'),
        ));
    };

    bs58::decode(body)
        .into_vec()
        .map_err(|e| EncodingError::InvalidBase58(format!("multibase body: {e}")))
}

/// `z` followed by the base58btc encoding of `bytes`
pub fn encode_base58btc(bytes: &[u8]) -> String {
    let mut text = bs58::encode(bytes).into_string();
    text.insert(0, BASE58BTC_PREFIX);
    text
}

/// Splits a multikey into its codec and the raw key bytes
pub fn decode_multikey(multikey: &str) -> Result<(Codec, Vec<u8>)> {
    let tagged = decode_base58btc(multikey)?;
    let (codec, key) = Codec::split(&tagged)?;
    Ok((codec, key.to_vec()))
}

/// Tags `key` with `codec` and encodes it as a multikey
pub fn encode_multikey(codec: Codec, key: &[u8]) -> String {
    encode_base58btc(&codec.prefix(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ED25519_MULTIKEY: &str = "z6MkiaMbhXHNA4eJVCCj8dbzKzTgYDKf6crKgHVHid1F1WCT";
    const SECP256K1_MULTIKEY: &str = "zQ3shjkeF9zSNqwuyakEBhGcWucmhR7XuNpHE11XxMF784zt1";

    #[test]
    fn base58btc_tag() {
        assert_eq!(decode_base58btc("zCn8eVZg").unwrap(), b"hello");
        assert_eq!(encode_base58btc(b"hello"), "zCn8eVZg");
        assert_eq!(encode_base58btc(&[]), "z");
    }

    #[test]
    fn other_bases_refused() {
        // 'm' is base64, 'u' is base64url
        for (text, tag) in [("mAQID", 'm'), ("uAQID", 'u'), ("", '\0')] {
            assert!(matches!(
                decode_base58btc(text).unwrap_err(),
                EncodingError::InvalidMultibasePrefix(found) if found == tag
            ));
        }
    }

    #[test]
    fn bad_base58_body() {
        assert!(matches!(
            decode_base58btc("z0OIl").unwrap_err(),
            EncodingError::InvalidBase58(_)
        ));
    }

    #[test]
    fn ed25519_multikey() {
        let (codec, key) = decode_multikey(ED25519_MULTIKEY).unwrap();
        assert_eq!(codec, Codec::Ed25519Pub);
        assert_eq!(key.len(), 32);
        assert_eq!(&key[..4], &[0x3d, 0x40, 0x17, 0xc3]);
        assert_eq!(encode_multikey(codec, &key), ED25519_MULTIKEY);
    }

    #[test]
    fn secp256k1_multikey_is_compressed() {
        let (codec, key) = decode_multikey(SECP256K1_MULTIKEY).unwrap();
        assert_eq!(codec, Codec::Secp256k1Pub);
        assert_eq!(key.len(), 33);
        assert_eq!(key[0], 0x03);
    }
}
