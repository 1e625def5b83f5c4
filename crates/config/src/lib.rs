//! Configuration management for the SigNoz dashboard manager.
//!
//! This crate provides types and loaders for the SigNoz connection settings
//! (environment variables, `.env`, CLI overrides) and the persisted login
//! session.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{SessionStore, SessionStoreError, StoredSession};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};
