//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SIGNOZ_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Builder calls applied after `from_env` (CLI flags) win over these values.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::MAX_MAX_RETRIES;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

/// Apply environment variable configuration to the loader.
///
/// Builder calls made after this (CLI flags) take precedence.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("SIGNOZ_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(email) = env_var_or_none("SIGNOZ_EMAIL") {
        loader.set_email(Some(email));
    }
    if let Some(password) = env_var_or_none("SIGNOZ_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(token) = env_var_or_none("SIGNOZ_TOKEN") {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = env_var_or_none("SIGNOZ_SKIP_VERIFY") {
        loader.set_skip_verify(Some(parse_bool("SIGNOZ_SKIP_VERIFY", &skip)?));
    }
    if let Some(timeout) = env_var_or_none("SIGNOZ_TIMEOUT") {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "SIGNOZ_TIMEOUT".to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = env_var_or_none("SIGNOZ_MAX_RETRIES") {
        let value: usize = retries.parse().map_err(|_| ConfigError::InvalidValue {
            var: "SIGNOZ_MAX_RETRIES".to_string(),
            message: "must be a non-negative integer".to_string(),
        })?;
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }

    // Only if not already set via CLI
    if loader.session_path().is_none()
        && let Some(path) = env_var_or_none("SIGNOZ_CONFIG_PATH")
    {
        loader.set_session_path(Some(PathBuf::from(path)));
    }

    Ok(())
}
