//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Assemble the effective `Config` from CLI flags, environment and the saved
//!   session, in that order of precedence.
//! - Distinguish commands that need a config from those that do not.
//!
//! Does NOT handle:
//! - `.env` loading (done in `main()` before parsing).
//! - Choosing a token (see `session`).

use anyhow::{Context, Result};
use signoz_config::{Config, ConfigLoader, SessionStore};
use tracing::warn;

use crate::args::Cli;

/// Context for command execution.
pub(crate) enum ConfigCommandContext {
    /// A validated config for commands that talk to SigNoz or the session file.
    Real(Box<Config>),
    /// For commands that need neither (shell completions).
    Placeholder,
}

impl ConfigCommandContext {
    /// Extract the real config, failing if this is a placeholder.
    pub(crate) fn into_real_config(self) -> Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Placeholder => {
                anyhow::bail!(
                    "Internal error: attempted to use placeholder config for an operation requiring real connection details"
                )
            }
        }
    }
}

/// Build the configuration for this invocation.
///
/// The saved session only fills the URL and email when neither a flag nor the
/// environment set them.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    // Blank values are ignored so the env var / default location still applies
    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_session_path(path.clone());
    }

    loader = loader
        .from_env()
        .context("Failed to load configuration from environment")?;

    if let Some(ref url) = cli.url {
        loader = loader.with_base_url(url.clone());
    }
    if let Some(ref token) = cli.token {
        loader = loader.with_token(token.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    match SessionStore::open(loader.session_path().map(|p| p.as_path())) {
        Ok(store) => match store.load() {
            Ok(Some(stored)) => loader = loader.with_stored_session(&stored),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring unreadable session file"),
        },
        Err(e) => warn!(error = %e, "Could not locate the session file"),
    }

    loader.build().context("Failed to build configuration")
}
