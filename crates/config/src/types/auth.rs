//! Authentication types for SigNoz configuration.
//!
//! Responsibilities:
//! - Define the authentication inputs a user can supply (token, email/password).
//! - Pick the strategy used to obtain a bearer token.
//!
//! Does NOT handle:
//! - The login exchange or JWT inspection (see client crate).
//! - Reading or writing the cached session (see `persistence`).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.
//! - An explicit token always wins over credentials.

use secrecy::SecretString;

/// Strategy for obtaining a SigNoz bearer token.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Email and password, exchanged for a JWT via the login endpoint.
    Credentials {
        email: String,
        password: SecretString,
    },
    /// A JWT supplied directly by the user.
    Token { token: SecretString },
}

/// Authentication inputs collected from the CLI and environment.
///
/// Every field is optional: a cached session can stand in for all of them.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub email: Option<String>,
    pub password: Option<SecretString>,
    pub token: Option<SecretString>,
}

impl AuthConfig {
    /// The strategy implied by the supplied inputs, token first.
    pub fn strategy(&self) -> Option<AuthStrategy> {
        if let Some(token) = &self.token {
            return Some(AuthStrategy::Token {
                token: token.clone(),
            });
        }
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some(AuthStrategy::Credentials {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}
