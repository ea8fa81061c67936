//! Authentication keys of a resolved DID document
//!
//! [`DocumentKeys`] holds one DID document and the keys extracted from it.
//! Keys are extracted once per document: replacing the document drops them.

use std::sync::Arc;

use didauth_crypto::CryptoKey;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{
    config::DocumentKeysConfig,
    document::Document,
    errors::{DocumentKeysError, Result},
    extractor::KeyExtractor,
    resolver::DocumentResolver,
    verification_method::{PublicKeyEntry, VerificationMethod, VerificationReference},
};

/// A verification method that contributed no key, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMethod {
    pub id: String,
    pub reason: String,
}

enum State {
    Unresolved,
    Resolved(Arc<Document>),
    Extracted {
        document: Arc<Document>,
        keys: Arc<[CryptoKey]>,
        skipped: Arc<[SkippedMethod]>,
    },
}

/// Holds a DID document and caches the keys it authorizes for authentication
///
/// Document replacement and extraction are serialized, so one instance can be
/// shared between threads.
pub struct DocumentKeys {
    config: DocumentKeysConfig,
    state: Mutex<State>,
}

impl Default for DocumentKeys {
    fn default() -> Self {
        DocumentKeys::new(DocumentKeysConfig::default())
    }
}

impl DocumentKeys {
    pub fn new(config: DocumentKeysConfig) -> Self {
        DocumentKeys {
            config,
            state: Mutex::new(State::Unresolved),
        }
    }

    /// Accepts an already resolved document for `did`
    ///
    /// The document must carry `did` as its id and list at least one
    /// authentication reference. A rejected document leaves the current state
    /// untouched.
    pub fn set_document(&self, document: Document, did: &str) -> Result<()> {
        self.check_did(did)?;

        if document.id != did {
            return Err(DocumentKeysError::InvalidDocument(format!(
                "Document id ({}) does not match DID ({did})",
                document.id
            )));
        }
        if document.authentication.is_empty() {
            return Err(DocumentKeysError::InvalidDocument(format!(
                "Document ({did}) has no authentication references"
            )));
        }

        debug!("DID document ({did}) set, cached keys cleared");
        *self.state.lock() = State::Resolved(Arc::new(document));
        Ok(())
    }

    /// Resolves `did` through `resolver` and sets the result
    pub fn resolve(&self, did: &str, resolver: &dyn DocumentResolver) -> Result<()> {
        self.check_did(did)?;

        debug!("resolving DID ({did}) with {}", resolver.name());
        let document = resolver.resolve(did)?;
        self.set_document(document, did)
    }

    fn check_did(&self, did: &str) -> Result<()> {
        if let Some(limit) = self.config.max_did_size_in_bytes
            && did.len() > limit
        {
            return Err(DocumentKeysError::InvalidDocument(format!(
                "DID is {} bytes, the limit is {limit}",
                did.len()
            )));
        }
        Ok(())
    }

    /// True once a document has been accepted
    pub fn is_resolved(&self) -> bool {
        !matches!(*self.state.lock(), State::Unresolved)
    }

    /// The current document, if any
    pub fn document(&self) -> Option<Arc<Document>> {
        match &*self.state.lock() {
            State::Unresolved => None,
            State::Resolved(document) | State::Extracted { document, .. } => {
                Some(document.clone())
            }
        }
    }

    /// Methods skipped by the last extraction, in document order
    pub fn skipped(&self) -> Arc<[SkippedMethod]> {
        match &*self.state.lock() {
            State::Extracted { skipped, .. } => skipped.clone(),
            _ => Arc::from(Vec::new()),
        }
    }

    /// Returns the keys the document authorizes for authentication
    ///
    /// The first call walks the document and caches the result; later calls
    /// return the cached keys until a new document is set. Methods that yield
    /// no key are skipped and reported through [`DocumentKeys::skipped`].
    pub fn extract_keys(&self, extractor: &dyn KeyExtractor) -> Result<Arc<[CryptoKey]>> {
        let mut state = self.state.lock();

        let document = match &*state {
            State::Unresolved => return Err(DocumentKeysError::UnresolvedDocument),
            State::Extracted { document, keys, .. } => {
                debug!("returning {} cached keys for ({})", keys.len(), document.id);
                return Ok(keys.clone());
            }
            State::Resolved(document) => document.clone(),
        };

        let (keys, skipped) = Extraction::new(&document, extractor, &self.config).run();
        let keys: Arc<[CryptoKey]> = Arc::from(keys);

        debug!(
            "extracted {} keys from ({}), skipped {}",
            keys.len(),
            document.id,
            skipped.len()
        );

        *state = State::Extracted {
            document,
            keys: keys.clone(),
            skipped: Arc::from(skipped),
        };

        Ok(keys)
    }
}

/// One pass over a document's reference list
struct Extraction<'a> {
    document: &'a Document,
    extractor: &'a dyn KeyExtractor,
    config: &'a DocumentKeysConfig,
    keys: Vec<CryptoKey>,
    skipped: Vec<SkippedMethod>,
}

impl<'a> Extraction<'a> {
    fn new(
        document: &'a Document,
        extractor: &'a dyn KeyExtractor,
        config: &'a DocumentKeysConfig,
    ) -> Self {
        Extraction {
            document,
            extractor,
            config,
            keys: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn run(mut self) -> (Vec<CryptoKey>, Vec<SkippedMethod>) {
        let document = self.document;
        let references = document.authentication_references(&self.config.ion_prefix);

        for (index, reference) in references.iter().enumerate() {
            if let Some(limit) = self.config.max_references
                && index >= limit
            {
                self.skip(reference.get_id(), format!("Reference limit ({limit}) reached"));
                continue;
            }
            self.reference(reference);
        }

        (self.keys, self.skipped)
    }

    fn reference(&mut self, reference: &VerificationReference) {
        match reference {
            VerificationReference::Reference(id) => {
                let document = self.document;
                let mut matched = false;
                for entry in document.find_public_keys(id) {
                    matched = true;
                    self.entry(entry);
                }
                if !matched {
                    self.skip(id, "No publicKey entry with this id".to_string());
                }
            }
            VerificationReference::Object(object) => {
                let inline = object.inline_method();
                if let Some(method) = &inline {
                    self.method(method);
                }

                let Some(names) = &object.public_key else {
                    if inline.is_none() {
                        self.skip(
                            reference.get_id(),
                            "Reference has neither a type nor publicKey names".to_string(),
                        );
                    }
                    return;
                };
                let document = self.document;
                for name in names {
                    let mut matched = false;
                    for entry in document.resolve_public_keys(name) {
                        matched = true;
                        self.entry(entry);
                    }
                    if !matched {
                        self.skip(name, "No publicKey entry matches this name".to_string());
                    }
                }
            }
            VerificationReference::Malformed(_) => {
                let reason = reference.malformed_reason().unwrap_or_default();
                self.skip(reference.get_id(), reason);
            }
        }
    }

    fn entry(&mut self, entry: &PublicKeyEntry) {
        match entry {
            PublicKeyEntry::Method(method) => self.method(method),
            PublicKeyEntry::Malformed(_) => {
                let reason = entry.malformed_reason().unwrap_or_default();
                self.skip(entry.id().unwrap_or_default(), reason);
            }
        }
    }

    fn method(&mut self, method: &VerificationMethod) {
        match self.extractor.extract(method) {
            Ok(key) => self.keys.push(key),
            Err(e) => self.skip(&method.id, e.to_string()),
        }
    }

    fn skip(&mut self, id: &str, reason: String) {
        warn!("skipping verification method ({id}): {reason}");
        self.skipped.push(SkippedMethod {
            id: id.to_string(),
            reason,
        });
    }
}
