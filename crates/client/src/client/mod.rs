//! Main SigNoz REST API client.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: login and bearer-token helpers
//! - `dashboards`: dashboard list/create/delete methods
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Choosing or caching a session (the caller injects a [`Session`])
//!
//! # Invariants
//! - A request is never silently re-authenticated; an expired token fails the call.

pub mod builder;
mod dashboards;
mod session;

use crate::auth::Session;

/// SigNoz REST API client.
///
/// ```rust,ignore
/// use signoz_client::{Session, SignozClient};
///
/// let client = SignozClient::builder()
///     .base_url("http://localhost:3301".to_string())
///     .session(session)
///     .build()?;
/// let dashboards = client.list_dashboards().await?;
/// ```
#[derive(Debug)]
pub struct SignozClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) session: Option<Session>,
    pub(crate) max_retries: usize,
}

impl SignozClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SignozClientBuilder {
        builder::SignozClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The underlying HTTP client, shared with source and catalog fetchers.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_client_builder_missing_base_url() {
        let client = SignozClient::builder().build();
        assert!(matches!(client.unwrap_err(), ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_client_builder_normalizes_base_url() {
        let client = SignozClient::builder()
            .base_url("http://localhost:3301/".to_string())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:3301");
    }

    #[test]
    fn test_skip_verify_with_http_url_still_builds() {
        let client = SignozClient::builder()
            .base_url("http://localhost:3301".to_string())
            .skip_verify(true)
            .build();
        assert!(client.is_ok());
    }
}
