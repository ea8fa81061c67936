/*!
*   DID Document Definition
*
*   Only the members needed to find authentication keys are modelled, any
*   other member is kept in `property_set`.
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::verification_method::{PublicKeyEntry, VerificationReference};

/// A resolved [DID Document]
///
/// [DID Document]: https://www.w3.org/TR/did-core/
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// DID Subject Identifier
    pub id: String,

    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<Value>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub authentication: Vec<VerificationReference>,

    /// Read instead of `authentication` for ION DIDs
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub verification_method: Vec<VerificationReference>,

    /// Key descriptions that references point into
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub public_key: Vec<PublicKeyEntry>,

    #[serde(flatten)]
    pub property_set: HashMap<String, Value>,
}

impl Document {
    /// Parses a JSON document
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }

    /// The reference list that carries authentication keys for this DID
    pub fn authentication_references(&self, ion_prefix: &str) -> &[VerificationReference] {
        if self.id.starts_with(ion_prefix) {
            &self.verification_method
        } else {
            &self.authentication
        }
    }

    /// `publicKey` entries whose id equals `id`
    pub fn find_public_keys<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = &'a PublicKeyEntry> + 'a {
        self.public_key
            .iter()
            .filter(move |entry| entry.id() == Some(id))
    }

    /// `publicKey` entries named by `name`, either absolute or as a fragment
    /// relative to the document id (`#key-1`)
    pub fn resolve_public_keys<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a PublicKeyEntry> + 'a {
        self.public_key.iter().filter(move |entry| {
            entry.id().is_some_and(|id| {
                id == name
                    || id
                        .strip_prefix(self.id.as_str())
                        .is_some_and(|fragment| fragment == name)
            })
        })
    }
}
