//! Configuration type definitions for the SigNoz dashboard manager.
//!
//! Responsibilities:
//! - Define configuration types for authentication and connections.
//! - Ensure consistent defaults and type safety across the configuration system.
//!
//! Does NOT handle:
//! - Configuration loading from environment variables (see `loader` module).
//! - Session persistence (see `persistence` module).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.

mod auth;
pub(crate) mod connection;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig};
