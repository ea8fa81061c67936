//! Multicodec prefixes for public keys
//!
//! A multicodec value is an unsigned varint naming the type of the bytes that
//! follow it. Only the public key codecs that map onto a supported key family
//! are modelled.
//!
//! See: <https://github.com/multiformats/multicodec>

use crate::{EncodingError, error::Result};

// See: https://github.com/multiformats/multicodec/blob/master/table.csv
pub const ED25519_PUB: u64 = 0xed;
pub const SECP256K1_PUB: u64 = 0xe7;
pub const RSA_PUB: u64 = 0x1205;

/// Public key codecs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Ed25519Pub,
    Secp256k1Pub,
    RsaPub,
    Unknown(u64),
}

impl Codec {
    pub fn from_u64(value: u64) -> Self {
        match value {
            ED25519_PUB => Codec::Ed25519Pub,
            SECP256K1_PUB => Codec::Secp256k1Pub,
            RSA_PUB => Codec::RsaPub,
            other => Codec::Unknown(other),
        }
    }

    pub fn to_u64(self) -> u64 {
        match self {
            Codec::Ed25519Pub => ED25519_PUB,
            Codec::Secp256k1Pub => SECP256K1_PUB,
            Codec::RsaPub => RSA_PUB,
            Codec::Unknown(v) => v,
        }
    }

    /// Splits a multicodec encoded buffer into its codec and payload
    pub fn split(bytes: &[u8]) -> Result<(Codec, &[u8])> {
        let (codec, data) = unsigned_varint::decode::u64(bytes)
            .map_err(|e| EncodingError::InvalidMulticodec(format!("varint decode: {e}")))?;
        Ok((Codec::from_u64(codec), data))
    }

    /// Prefixes `bytes` with this codec
    pub fn prefix(self, bytes: &[u8]) -> Vec<u8> {
        let mut codec_buffer = unsigned_varint::encode::u64_buffer();
        let encoded_codec = unsigned_varint::encode::u64(self.to_u64(), &mut codec_buffer);

        let mut result = Vec::with_capacity(encoded_codec.len() + bytes.len());
        result.extend_from_slice(encoded_codec);
        result.extend_from_slice(bytes);
        result
    }
}
