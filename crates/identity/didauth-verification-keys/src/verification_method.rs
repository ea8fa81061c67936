//! DID Verification Method Definition
//! <https://www.w3.org/TR/did-core/#verification-methods>
use std::collections::HashMap;

use didauth_encoding::KeyFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::one_or_many::OneOrMany;

pub const PUBLIC_KEY_JWK: &str = "publicKeyJwk";
pub const PUBLIC_KEY_PEM: &str = "publicKeyPem";
pub const PUBLIC_KEY_HEX: &str = "publicKeyHex";
pub const PUBLIC_KEY_BASE58: &str = "publicKeyBase58";
pub const PUBLIC_KEY_BASE64: &str = "publicKeyBase64";
pub const PUBLIC_KEY_MULTIBASE: &str = "publicKeyMultibase";

/// A concrete key description: an entry of `publicKey`, `verificationMethod`,
/// or an inline `authentication` object.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,

    #[serde(rename = "type")]
    pub type_: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub controller: Option<String>,

    /// Key material and any other members
    #[serde(flatten)]
    pub property_set: HashMap<String, Value>,
}

/// Key material carried by a verification method
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PublicKeyMaterial<'a> {
    Jwk(&'a Value),
    Encoded(&'a Value, KeyFormat),
    Multibase(&'a Value),
}

impl PublicKeyMaterial<'_> {
    /// The member name the material was read from
    pub fn field(&self) -> &'static str {
        match self {
            PublicKeyMaterial::Jwk(_) => PUBLIC_KEY_JWK,
            PublicKeyMaterial::Encoded(_, KeyFormat::Pem) => PUBLIC_KEY_PEM,
            PublicKeyMaterial::Encoded(_, KeyFormat::Hex) => PUBLIC_KEY_HEX,
            PublicKeyMaterial::Encoded(_, KeyFormat::Base58) => PUBLIC_KEY_BASE58,
            PublicKeyMaterial::Encoded(_, KeyFormat::Base64) => PUBLIC_KEY_BASE64,
            PublicKeyMaterial::Multibase(_) => PUBLIC_KEY_MULTIBASE,
        }
    }
}

impl VerificationMethod {
    /// Returns the first key material member present, checked in the order
    /// JWK, PEM, hex, base58, base64, multibase
    pub fn public_key_material(&self) -> Option<PublicKeyMaterial<'_>> {
        let get = |field: &str| self.property_set.get(field);

        if let Some(jwk) = get(PUBLIC_KEY_JWK) {
            return Some(PublicKeyMaterial::Jwk(jwk));
        }

        [
            (PUBLIC_KEY_PEM, KeyFormat::Pem),
            (PUBLIC_KEY_HEX, KeyFormat::Hex),
            (PUBLIC_KEY_BASE58, KeyFormat::Base58),
            (PUBLIC_KEY_BASE64, KeyFormat::Base64),
        ]
        .into_iter()
        .find_map(|(field, format)| get(field).map(|value| PublicKeyMaterial::Encoded(value, format)))
        .or_else(|| get(PUBLIC_KEY_MULTIBASE).map(PublicKeyMaterial::Multibase))
    }
}

/// An entry of `publicKey`
///
/// Entries that don't describe a method are kept as raw JSON so the rest of
/// the document stays usable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PublicKeyEntry {
    Method(VerificationMethod),
    Malformed(Value),
}

impl PublicKeyEntry {
    /// The entry's `id`, when it is a string
    pub fn id(&self) -> Option<&str> {
        match self {
            PublicKeyEntry::Method(method) => Some(&method.id),
            PublicKeyEntry::Malformed(value) => value.get("id").and_then(Value::as_str),
        }
    }

    /// Why the entry could not be read as a [`VerificationMethod`]
    pub fn malformed_reason(&self) -> Option<String> {
        let PublicKeyEntry::Malformed(value) = self else {
            return None;
        };

        Some(match VerificationMethod::deserialize(value) {
            Err(e) => format!("Malformed publicKey entry: {e}"),
            Ok(_) => "Malformed publicKey entry".to_string(),
        })
    }
}

/// An entry of `authentication` (or of `verificationMethod` for ION DIDs)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum VerificationReference {
    /// Names a `publicKey` entry by id
    Reference(String),
    /// An embedded method, a `publicKey` indirection, or both
    Object(Box<ReferenceObject>),
    /// Anything else (`null`, numbers, objects with mistyped members)
    Malformed(Value),
}

impl VerificationReference {
    /// Best available identifier, used in diagnostics
    pub fn get_id(&self) -> &str {
        match self {
            VerificationReference::Reference(id) => id,
            VerificationReference::Object(object) => object
                .id
                .as_deref()
                .or_else(|| object.public_key.iter().flatten().next().map(String::as_str))
                .unwrap_or_default(),
            VerificationReference::Malformed(value) => {
                value.get("id").and_then(Value::as_str).unwrap_or_default()
            }
        }
    }

    /// Why the entry could not be read as a reference
    pub fn malformed_reason(&self) -> Option<String> {
        let VerificationReference::Malformed(value) = self else {
            return None;
        };

        Some(match value {
            Value::Object(_) => match ReferenceObject::deserialize(value) {
                Err(e) => format!("Malformed reference: {e}"),
                Ok(_) => "Malformed reference".to_string(),
            },
            other => format!("Malformed reference: expected a DID URL or an object, found {other}"),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceObject {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub type_: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub controller: Option<String>,

    /// Names of `publicKey` entries, absolute or relative to the document id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub public_key: Option<OneOrMany<String>>,

    #[serde(flatten)]
    pub property_set: HashMap<String, Value>,
}

impl ReferenceObject {
    /// The embedded method, when both `id` and `type` are present
    pub fn inline_method(&self) -> Option<VerificationMethod> {
        let (Some(id), Some(type_)) = (&self.id, &self.type_) else {
            return None;
        };

        Some(VerificationMethod {
            id: id.clone(),
            type_: type_.clone(),
            controller: self.controller.clone(),
            property_set: self.property_set.clone(),
        })
    }
}
