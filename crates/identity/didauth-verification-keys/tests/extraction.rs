use std::sync::Arc;

use common::{init_logging, load_document, load_test_file};
use didauth_crypto::{CryptoKey, JWK, KeyType};
use didauth_verification_keys::{
    CompositeExtractor, Document, DocumentKeys, DocumentKeysConfigBuilder, DocumentKeysError,
    LocalResolver, ResolverError,
};
use serde_json::json;

mod common;

const PARTIAL_DID: &str = "did:example:partial";
const ION_DID: &str = "did:ion:EiClkZMDxPKqC9c-umQfTkR8vvZ9JPhl_xLDI9Nfk38w5w";
const RELATIVE_DID: &str = "did:example:relative";
const MALFORMED_DID: &str = "did:example:malformed";

fn private_key(jwk: serde_json::Value) -> CryptoKey {
    let jwk: JWK = serde_json::from_value(jwk).expect("Failed to parse JWK");
    CryptoKey::from_jwk(&jwk).expect("Failed to import JWK")
}

fn ed25519_private() -> CryptoKey {
    private_key(json!({
        "kty": "OKP",
        "crv": "Ed25519",
        "x": "PUAXw-hDiVqStwqnTRt-vJyYLM8uxJaMwM1V8Sr0Zgw",
        "d": "TM0Imyj_ltqdtsNG7BFOD1uKMZ81q6Yk2oz27U-4pvs"
    }))
}

fn secp256k1_private() -> CryptoKey {
    private_key(json!({
        "kty": "EC",
        "crv": "secp256k1",
        "x": "S_caroUAnHCypb9QTfWkCpB2Yx792O3uw_6eDNbGQLo",
        "y": "k-FA2c2UBoH4D_PWZ7LPiRDr5WPbahMi8duNOU1Lcdc",
        "d": "mD9ssK9cdYw7hW9cT6rSSi67urjBz-7fce3Q6bAka-E"
    }))
}

fn kids(keys: &[CryptoKey]) -> Vec<&str> {
    keys.iter().map(|key| key.kid().unwrap_or_default()).collect()
}

#[test]
fn test_extract_before_document_is_set() {
    let keys = DocumentKeys::default();

    assert!(!keys.is_resolved());
    assert!(matches!(
        keys.extract_keys(&CompositeExtractor::default()),
        Err(DocumentKeysError::UnresolvedDocument)
    ));
}

#[test]
fn test_partial_corruption_keeps_good_keys() {
    init_logging();

    let keys = DocumentKeys::default();
    keys.set_document(load_document("partial_corruption"), PARTIAL_DID)
        .expect("Document should be accepted");

    let extracted = keys
        .extract_keys(&CompositeExtractor::default())
        .expect("Extraction should not fail on bad methods");

    assert_eq!(extracted.len(), 3);
    assert_eq!(
        kids(&extracted),
        vec![
            "did:example:partial#ed25519",
            "did:example:partial#secp256k1",
            "did:example:partial#rsa",
        ]
    );
    let families: Vec<KeyType> = extracted.iter().map(CryptoKey::kty).collect();
    assert_eq!(families, vec![KeyType::Okp, KeyType::Ec, KeyType::Rsa]);
    assert!(extracted.iter().all(|key| !key.is_private()));

    let skipped = keys.skipped();
    let skipped_ids: Vec<&str> = skipped.iter().map(|skip| skip.id.as_str()).collect();
    assert_eq!(
        skipped_ids,
        vec!["did:example:partial#x25519", "did:example:partial#dsa"]
    );
    assert!(skipped[0].reason.contains("X25519KeyAgreementKey2019"));
}

#[test]
fn test_extraction_is_cached() {
    let keys = DocumentKeys::default();
    keys.set_document(load_document("partial_corruption"), PARTIAL_DID)
        .unwrap();

    let first = keys.extract_keys(&CompositeExtractor::default()).unwrap();
    // A different extractor is not consulted once keys are cached
    let second = keys.extract_keys(&CompositeExtractor::empty()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    let thumbprints = |keys: &[CryptoKey]| -> Vec<String> {
        keys.iter().map(|key| key.thumbprint().unwrap()).collect()
    };
    assert_eq!(thumbprints(&first), thumbprints(&second));
}

#[test]
fn test_new_document_clears_cache() {
    let keys = DocumentKeys::default();
    keys.set_document(load_document("partial_corruption"), PARTIAL_DID)
        .unwrap();
    assert_eq!(keys.extract_keys(&CompositeExtractor::empty()).unwrap().len(), 0);

    keys.set_document(load_document("partial_corruption"), PARTIAL_DID)
        .unwrap();
    assert!(keys.skipped().is_empty());
    assert_eq!(
        keys.extract_keys(&CompositeExtractor::default())
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn test_ion_document_reads_verification_method() {
    let keys = DocumentKeys::default();
    keys.set_document(load_document("ion_document"), ION_DID)
        .unwrap();

    let extracted = keys.extract_keys(&CompositeExtractor::default()).unwrap();
    assert_eq!(kids(&extracted), vec!["#signing-key", "#auth-key"]);
    assert_eq!(extracted[0].kty(), KeyType::Ec);
    assert_eq!(extracted[1].kty(), KeyType::Okp);
}

#[test]
fn test_long_form_ion_did_is_accepted() {
    let document = load_document("ion_long_form");
    let did = document.id.clone();
    assert!(did.len() > 1_000);

    let keys = DocumentKeys::default();
    keys.set_document(document, &did)
        .expect("Long-form ION DIDs should be accepted");

    let extracted = keys.extract_keys(&CompositeExtractor::default()).unwrap();
    assert_eq!(kids(&extracted), vec!["#signing-key", "#auth-key"]);

    let limited = DocumentKeys::new(
        DocumentKeysConfigBuilder::default()
            .with_max_did_size_in_bytes(1_000)
            .build(),
    );
    assert!(matches!(
        limited.set_document(load_document("ion_long_form"), &did),
        Err(DocumentKeysError::InvalidDocument(_))
    ));
}

#[test]
fn test_malformed_entries_are_skipped() {
    init_logging();

    let raw = load_test_file("tests/test_vectors/malformed_entries.json");
    let document =
        Document::from_json(&raw).expect("Malformed entries should not reject the document");

    let keys = DocumentKeys::default();
    keys.set_document(document, MALFORMED_DID).unwrap();

    let extracted = keys.extract_keys(&CompositeExtractor::default()).unwrap();
    assert_eq!(
        kids(&extracted),
        vec![
            "did:example:malformed#ed25519",
            "did:example:malformed#secp256k1",
        ]
    );

    let skipped = keys.skipped();
    assert_eq!(skipped.len(), 4);
    assert_eq!(skipped[1].id, "did:example:malformed#untyped");
    assert!(skipped[0].reason.contains("found null"));
    assert!(skipped[1].reason.contains("missing field `type`"));
    assert!(skipped[2].reason.starts_with("Malformed reference"));
    assert!(skipped[3].reason.contains("found 12345"));
}

#[test]
fn test_ion_prefix_is_configurable() {
    let config = DocumentKeysConfigBuilder::default()
        .with_ion_prefix("did:sidetree")
        .build();
    let keys = DocumentKeys::new(config);
    keys.set_document(load_document("ion_document"), ION_DID)
        .unwrap();

    let extracted = keys.extract_keys(&CompositeExtractor::default()).unwrap();
    assert_eq!(kids(&extracted), vec!["#legacy"]);
    assert_eq!(extracted[0].kty(), KeyType::Rsa);
}

#[test]
fn test_relative_references() {
    let keys = DocumentKeys::default();
    keys.set_document(load_document("relative_references"), RELATIVE_DID)
        .unwrap();

    let extracted = keys.extract_keys(&CompositeExtractor::default()).unwrap();
    assert_eq!(
        kids(&extracted),
        vec![
            "did:example:relative#key-1",
            "did:example:relative#key-2",
            "did:example:relative#key-3",
            "did:example:relative#key-2",
        ]
    );

    // Bare string references only match absolute ids
    let skipped = keys.skipped();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].id, "#key-1");
}

#[test]
fn test_extracted_keys_verify_signatures() {
    let keys = DocumentKeys::default();
    keys.set_document(load_document("partial_corruption"), PARTIAL_DID)
        .unwrap();
    let extracted = keys.extract_keys(&CompositeExtractor::default()).unwrap();

    let message = b"did-auth challenge 8f1d";

    let signature = ed25519_private().sign(message).unwrap();
    assert!(extracted[0].verify(message, &signature).is_ok());
    assert!(extracted[0].verify(b"another challenge", &signature).is_err());

    let signature = secp256k1_private().sign(message).unwrap();
    assert!(extracted[1].verify(message, &signature).is_ok());
    assert!(extracted[0].verify(message, &signature).is_err());
}

#[test]
fn test_resolve_through_resolver() {
    let mut resolver = LocalResolver::new();
    resolver
        .insert_from_string(&load_test_file(
            "tests/test_vectors/relative_references.json",
        ))
        .unwrap();

    let keys = DocumentKeys::default();
    keys.resolve(RELATIVE_DID, &resolver).unwrap();
    assert!(keys.is_resolved());
    assert_eq!(
        keys.document().map(|document| document.id.clone()),
        Some(RELATIVE_DID.to_string())
    );

    let missing = DocumentKeys::default();
    assert!(matches!(
        missing.resolve("did:example:missing", &resolver),
        Err(DocumentKeysError::DocumentResolution(
            ResolverError::NotFound(_)
        ))
    ));
    assert!(!missing.is_resolved());
}

#[test]
fn test_document_for_other_did_is_rejected() {
    let keys = DocumentKeys::default();

    assert!(matches!(
        keys.set_document(load_document("partial_corruption"), RELATIVE_DID),
        Err(DocumentKeysError::InvalidDocument(_))
    ));
    assert!(!keys.is_resolved());
}
