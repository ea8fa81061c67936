//! Configuration for [`DocumentKeys`](crate::DocumentKeys)
//!
//! ```rust
//! use didauth_verification_keys::config::DocumentKeysConfigBuilder;
//! let config = DocumentKeysConfigBuilder::default()
//!     .with_max_references(16)
//!     .build();
//! ```

/// Use the [DocumentKeysConfigBuilder] to create a new configuration.
#[derive(Clone, Debug)]
pub struct DocumentKeysConfig {
    pub(crate) ion_prefix: String,
    pub(crate) max_did_size_in_bytes: Option<usize>,
    pub(crate) max_references: Option<usize>,
}

impl Default for DocumentKeysConfig {
    fn default() -> Self {
        DocumentKeysConfigBuilder::default().build()
    }
}

impl DocumentKeysConfig {
    pub fn ion_prefix(&self) -> &str {
        &self.ion_prefix
    }

    pub fn max_did_size_in_bytes(&self) -> Option<usize> {
        self.max_did_size_in_bytes
    }

    pub fn max_references(&self) -> Option<usize> {
        self.max_references
    }
}

/// - ion_prefix: DIDs starting with this are read from `verificationMethod` (default: `did:ion`).
/// - max_did_size_in_bytes: Longer DIDs are rejected (default: no limit).
/// - max_references: References past this count are skipped (default: no limit).
pub struct DocumentKeysConfigBuilder {
    ion_prefix: String,
    max_did_size_in_bytes: Option<usize>,
    max_references: Option<usize>,
}

impl Default for DocumentKeysConfigBuilder {
    fn default() -> Self {
        Self {
            ion_prefix: "did:ion".to_string(),
            max_did_size_in_bytes: None,
            max_references: None,
        }
    }
}

impl DocumentKeysConfigBuilder {
    /// Set the DID prefix whose documents list keys under `verificationMethod`
    /// Default: `did:ion`
    pub fn with_ion_prefix(mut self, ion_prefix: &str) -> Self {
        self.ion_prefix = ion_prefix.into();
        self
    }

    /// Set maximum size in bytes of a DID
    /// Default: no limit
    pub fn with_max_did_size_in_bytes(mut self, max_did_size_in_bytes: usize) -> Self {
        self.max_did_size_in_bytes = Some(max_did_size_in_bytes);
        self
    }

    /// Set maximum number of references walked per extraction
    /// Default: every reference is walked
    pub fn with_max_references(mut self, max_references: usize) -> Self {
        self.max_references = Some(max_references);
        self
    }

    pub fn build(self) -> DocumentKeysConfig {
        DocumentKeysConfig {
            ion_prefix: self.ion_prefix,
            max_did_size_in_bytes: self.max_did_size_in_bytes,
            max_references: self.max_references,
        }
    }
}
