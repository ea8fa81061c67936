//! Externally encoded key input

use didauth_encoding::KeyFormat;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::KeyUse;

/// Key text plus the encoding it was supplied in
///
/// ```json
/// { "key": "-----BEGIN RSA PUBLIC KEY-----...", "kid": "key-1", "use": "sig", "format": "PEM" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct EncodedKey {
    pub key: String,
    pub kid: String,
    #[serde(rename = "use", default)]
    #[zeroize(skip)]
    pub key_use: KeyUse,
    #[zeroize(skip)]
    pub format: KeyFormat,
}

impl EncodedKey {
    pub fn new(key: impl Into<String>, kid: impl Into<String>, format: KeyFormat) -> Self {
        EncodedKey {
            key: key.into(),
            kid: kid.into(),
            key_use: KeyUse::default(),
            format,
        }
    }

    pub fn with_use(mut self, key_use: KeyUse) -> Self {
        self.key_use = key_use;
        self
    }
}
