/*!
 * Authentication keys from DID documents.
 *
 * A [`DocumentKeys`] wrapper holds one resolved DID document. Calling
 * [`DocumentKeys::extract_keys`] walks the document's authentication
 * references, turns every usable verification method into a
 * [`CryptoKey`](didauth_crypto::CryptoKey) and caches the result until a new
 * document is set.
 *
 * ```rust
 * use didauth_verification_keys::{CompositeExtractor, Document, DocumentKeys};
 *
 * let document = Document::from_json(r##"{
 *     "id": "did:example:123",
 *     "authentication": ["did:example:123#key-1"],
 *     "publicKey": [{
 *         "id": "did:example:123#key-1",
 *         "type": "Ed25519VerificationKey2018",
 *         "publicKeyBase58": "586Z7H2vpX9qNhN2T4e9Utugie3ogjbxzGaMtM3E6HR5"
 *     }]
 * }"##)?;
 *
 * let keys = DocumentKeys::default();
 * keys.set_document(document, "did:example:123")?;
 * let extracted = keys.extract_keys(&CompositeExtractor::default())?;
 * assert_eq!(extracted.len(), 1);
 * # Ok::<(), Box<dyn std::error::Error>>(())
 * ```
 */

pub mod config;
pub mod document;
pub mod errors;
pub mod extractor;
pub mod keys;
pub mod one_or_many;
pub mod resolver;
pub mod verification_method;

pub use config::{DocumentKeysConfig, DocumentKeysConfigBuilder};
pub use document::Document;
pub use errors::{DocumentKeysError, ExtractionError};
pub use extractor::{CompositeExtractor, KeyExtractor};
pub use keys::{DocumentKeys, SkippedMethod};
pub use resolver::{DocumentResolver, LocalResolver, ResolverError};
pub use verification_method::{PublicKeyEntry, VerificationMethod, VerificationReference};
