#![allow(dead_code)]

use didauth_verification_keys::Document;
use tracing_subscriber::EnvFilter;

/// Reads a file relative to the package root
pub fn load_test_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Couldn't read test file ({path}): {e}"))
}

pub fn load_document(name: &str) -> Document {
    let raw = load_test_file(&format!("tests/test_vectors/{name}.json"));
    Document::from_json(&raw).expect("Failed to parse DID document JSON")
}

/// Enables log output when RUST_LOG is set
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
