//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::path::Path;

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use signoz_client::endpoints;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token used for every authenticated mock call.
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-token";

/// Load a JSON fixture by path relative to `fixtures/`.
#[allow(dead_code)]
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let full_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// A client pointed at `server` with a non-expiring session.
#[allow(dead_code)]
pub fn authed_client(server: &MockServer) -> signoz_client::SignozClient {
    let session = signoz_client::Session::new(
        secrecy::SecretString::new(TEST_TOKEN.into()),
        server.uri(),
        None,
    );
    signoz_client::SignozClient::builder()
        .base_url(server.uri())
        .session(session)
        .build()
        .expect("client builds")
}
