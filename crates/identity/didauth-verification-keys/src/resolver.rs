/*!
 * DID resolution boundary.
 *
 * Resolution transports live outside this crate; they plug in through the
 * [`DocumentResolver`] trait. [`LocalResolver`] serves documents from memory
 * and is meant for tests and offline use.
 */

use std::collections::HashMap;

use tracing::debug;

use crate::document::Document;

/// Error type for resolver failures.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The resolver has no document for this DID.
    #[error("DID not found: {0}")]
    NotFound(String),

    /// Resolution failed due to a network or IO error.
    #[error("Resolution failed: {0}")]
    ResolutionFailed(String),

    /// The resolved document was malformed.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Wraps an arbitrary error source.
    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ResolverError {
    /// Create an `Other` error from any error type.
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Synchronous DID resolver.
pub trait DocumentResolver: Send + Sync {
    /// Human-readable name for this resolver, used in logs.
    fn name(&self) -> &str;

    /// Resolve the given DID to a Document.
    fn resolve(&self, did: &str) -> Result<Document, ResolverError>;
}

/// In-memory resolver keyed by document id
#[derive(Clone, Default)]
pub struct LocalResolver {
    documents: HashMap<String, Document>,
}

impl LocalResolver {
    pub fn new() -> Self {
        LocalResolver::default()
    }

    /// Insert a DID document, replacing any document with the same id
    pub fn insert(&mut self, document: Document) {
        self.documents.insert(document.id.clone(), document);
    }

    /// Insert a DID document from its JSON representation
    pub fn insert_from_string(&mut self, document: &str) -> Result<(), ResolverError> {
        let document = Document::from_json(document).map_err(|e| {
            ResolverError::InvalidDocument(format!("Couldn't parse Document String: {e}"))
        })?;
        self.insert(document);
        Ok(())
    }

    pub fn get(&self, did: &str) -> Option<&Document> {
        self.documents.get(did)
    }
}

impl DocumentResolver for LocalResolver {
    fn name(&self) -> &str {
        "LocalResolver"
    }

    fn resolve(&self, did: &str) -> Result<Document, ResolverError> {
        debug!("resolving DID ({did}) from local documents");
        self.get(did)
            .cloned()
            .ok_or_else(|| ResolverError::NotFound(did.to_string()))
    }
}
