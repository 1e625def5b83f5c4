//! Client builder for constructing [`SignozClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`SignozClient`] methods)
//! - Obtaining a session (login happens through the built client)
//!
//! # Invariants
//! - `base_url` is required; a session is optional until the first authenticated call
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use crate::auth::Session;
use crate::client::SignozClient;
use crate::error::{ClientError, Result};
use signoz_config::{
    Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};

/// Builder for creating a new [`SignozClient`].
pub struct SignozClientBuilder {
    base_url: Option<String>,
    session: Option<Session>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
}

impl Default for SignozClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            session: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl SignozClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the SigNoz server, e.g. `http://localhost:3301`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Attach the session used for authenticated calls.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against servers with self-signed certificates you trust.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of HTTP 429 retries. Default is 0 (no retries).
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Pre-configure the builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`SignozClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<SignozClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .user_agent(concat!("sdm/", env!("CARGO_PKG_VERSION")));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(SignozClient {
            http,
            base_url,
            session: self.session,
            max_retries: self.max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = Config::default();
        config.connection.base_url = "https://signoz.example.com".to_string();
        config.connection.skip_verify = true;
        config.connection.timeout = Duration::from_secs(120);
        config.connection.max_retries = 2;

        let builder = SignozClient::builder().from_config(&config);

        assert_eq!(
            builder.base_url,
            Some("https://signoz.example.com".to_string())
        );
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert_eq!(builder.max_retries, 2);
    }

    #[test]
    fn test_default_has_no_retries() {
        assert_eq!(SignozClientBuilder::new().max_retries, 0);
    }

    #[test]
    fn test_normalize_base_url_multiple_trailing_slashes() {
        assert_eq!(
            SignozClientBuilder::normalize_base_url("http://localhost:3301//".to_string()),
            "http://localhost:3301"
        );
    }
}
