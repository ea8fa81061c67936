//! Building keys from verification methods
//!
//! A [`KeyExtractor`] turns one verification method into a [`CryptoKey`].
//! [`CompositeExtractor`] is the default: it looks the method `type` up in a
//! table of per-family extractors, which callers can extend or override.

use std::{collections::HashMap, sync::Arc};

use didauth_crypto::{CryptoKey, EncodedKey, JWK, KeyType};
use serde_json::Value;

use crate::{
    errors::ExtractionError,
    verification_method::{PublicKeyMaterial, VerificationMethod},
};

pub const ED25519_TYPES: [&str; 3] = [
    "Ed25519VerificationKey2018",
    "Ed25519VerificationKey2020",
    "Ed25519Signature2018",
];

pub const SECP256K1_TYPES: [&str; 4] = [
    "EcdsaSecp256k1VerificationKey2019",
    "Secp256k1VerificationKey2018",
    "Secp256k1SignatureVerificationKey2018",
    "EcdsaSecp256k1Signature2019",
];

pub const RSA_TYPES: [&str; 2] = ["RsaVerificationKey2018", "RsaSignature2018"];

pub const JSON_WEB_KEY_2020: &str = "JsonWebKey2020";
pub const MULTIKEY: &str = "Multikey";

/// Builds a key from a single verification method
pub trait KeyExtractor: Send + Sync {
    fn extract(&self, method: &VerificationMethod) -> Result<CryptoKey, ExtractionError>;
}

impl<F> KeyExtractor for F
where
    F: Fn(&VerificationMethod) -> Result<CryptoKey, ExtractionError> + Send + Sync,
{
    fn extract(&self, method: &VerificationMethod) -> Result<CryptoKey, ExtractionError> {
        self(method)
    }
}

/// Extracts keys of one family from any supported material member
pub struct KeyTypeExtractor {
    key_type: KeyType,
}

impl KeyTypeExtractor {
    pub fn new(key_type: KeyType) -> Self {
        KeyTypeExtractor { key_type }
    }
}

impl KeyExtractor for KeyTypeExtractor {
    fn extract(&self, method: &VerificationMethod) -> Result<CryptoKey, ExtractionError> {
        let material = method
            .public_key_material()
            .ok_or_else(|| ExtractionError::MissingKeyMaterial(method.id.clone()))?;
        let key = key_from_material(method, material, Some(self.key_type))?;

        if key.kty() != self.key_type {
            return Err(ExtractionError::InvalidKeyMaterial {
                id: method.id.clone(),
                reason: format!(
                    "{} expects a {} key, found {}",
                    method.type_,
                    self.key_type,
                    key.kty()
                ),
            });
        }

        Ok(key)
    }
}

/// `JsonWebKey2020`: the family comes from `publicKeyJwk.kty`
pub struct JsonWebKeyExtractor;

impl KeyExtractor for JsonWebKeyExtractor {
    fn extract(&self, method: &VerificationMethod) -> Result<CryptoKey, ExtractionError> {
        match method.public_key_material() {
            Some(material @ PublicKeyMaterial::Jwk(_)) => key_from_material(method, material, None),
            _ => Err(ExtractionError::MissingKeyMaterial(method.id.clone())),
        }
    }
}

/// `Multikey`: the family comes from the multicodec prefix
pub struct MultikeyExtractor;

impl KeyExtractor for MultikeyExtractor {
    fn extract(&self, method: &VerificationMethod) -> Result<CryptoKey, ExtractionError> {
        match method.public_key_material() {
            Some(material @ PublicKeyMaterial::Multibase(_)) => {
                key_from_material(method, material, None)
            }
            _ => Err(ExtractionError::MissingKeyMaterial(method.id.clone())),
        }
    }
}

/// Dispatches on the verification method `type`
#[derive(Clone)]
pub struct CompositeExtractor {
    extractors: HashMap<String, Arc<dyn KeyExtractor>>,
}

impl Default for CompositeExtractor {
    fn default() -> Self {
        let ed25519: Arc<dyn KeyExtractor> = Arc::new(KeyTypeExtractor::new(KeyType::Okp));
        let secp256k1: Arc<dyn KeyExtractor> = Arc::new(KeyTypeExtractor::new(KeyType::Ec));
        let rsa: Arc<dyn KeyExtractor> = Arc::new(KeyTypeExtractor::new(KeyType::Rsa));

        let mut extractors: HashMap<String, Arc<dyn KeyExtractor>> = HashMap::new();
        for type_ in ED25519_TYPES {
            extractors.insert(type_.to_string(), ed25519.clone());
        }
        for type_ in SECP256K1_TYPES {
            extractors.insert(type_.to_string(), secp256k1.clone());
        }
        for type_ in RSA_TYPES {
            extractors.insert(type_.to_string(), rsa.clone());
        }
        extractors.insert(JSON_WEB_KEY_2020.to_string(), Arc::new(JsonWebKeyExtractor));
        extractors.insert(MULTIKEY.to_string(), Arc::new(MultikeyExtractor));

        CompositeExtractor { extractors }
    }
}

impl CompositeExtractor {
    /// A composite with no registered types
    pub fn empty() -> Self {
        CompositeExtractor {
            extractors: HashMap::new(),
        }
    }

    /// Registers `extractor` for `type_`, replacing any existing entry
    pub fn with_extractor(mut self, type_: &str, extractor: impl KeyExtractor + 'static) -> Self {
        self.extractors.insert(type_.to_string(), Arc::new(extractor));
        self
    }

    pub fn supports(&self, type_: &str) -> bool {
        self.extractors.contains_key(type_)
    }
}

impl KeyExtractor for CompositeExtractor {
    fn extract(&self, method: &VerificationMethod) -> Result<CryptoKey, ExtractionError> {
        let Some(extractor) = self.extractors.get(&method.type_) else {
            return Err(ExtractionError::UnsupportedType(method.type_.clone()));
        };
        extractor.extract(method)
    }
}

fn key_from_material(
    method: &VerificationMethod,
    material: PublicKeyMaterial<'_>,
    key_type: Option<KeyType>,
) -> Result<CryptoKey, ExtractionError> {
    let invalid = |reason: String| ExtractionError::InvalidKeyMaterial {
        id: method.id.clone(),
        reason,
    };
    let text = |value: &Value| {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| invalid(format!("{} must be a string", material.field())))
    };

    let key = match material {
        PublicKeyMaterial::Jwk(value) => {
            let jwk: JWK = serde_json::from_value(value.clone())
                .map_err(|e| invalid(format!("Couldn't parse publicKeyJwk: {e}")))?;
            CryptoKey::from_jwk(&jwk)?
        }
        PublicKeyMaterial::Encoded(value, format) => {
            let Some(key_type) = key_type else {
                return Err(invalid(format!(
                    "{} needs a verification method type naming the key family",
                    material.field()
                )));
            };
            let encoded = EncodedKey::new(text(value)?, method.id.as_str(), format);
            CryptoKey::from_encoded_public(key_type, &encoded)?
        }
        PublicKeyMaterial::Multibase(value) => CryptoKey::from_multikey(None, &text(value)?)?,
    };

    let key = key.with_kid(method.id.as_str());
    if key.is_private() {
        Ok(key.to_public()?)
    } else {
        Ok(key)
    }
}
