//! Bearer sessions and JWT expiry inspection.
//!
//! Responsibilities:
//! - Hold the explicit [`Session`] value injected into the client.
//! - Decode the `exp` claim of a SigNoz JWT (no signature verification).
//!
//! Does NOT handle:
//! - The login exchange (see `endpoints::login`).
//! - Persisting sessions to disk (see `signoz_config::SessionStore`).
//!
//! Invariants:
//! - Tokens within `TOKEN_EXPIRY_BUFFER_SECS` of `exp` count as expired.
//! - A JWT without `exp` never expires; a token that cannot be decoded is expired.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use signoz_config::constants::TOKEN_EXPIRY_BUFFER_SECS;

/// What is known about when a token stops being accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenExpiry {
    /// JWT carries no `exp` claim.
    Never,
    /// JWT `exp` claim.
    At(DateTime<Utc>),
    /// Not a decodable JWT.
    Unknown,
}

/// Read the `exp` claim of a JWT.
pub fn token_expiry(token: &str) -> TokenExpiry {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return TokenExpiry::Unknown,
    };

    // Some issuers keep the padding; the no-pad engine rejects it.
    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(_) => return TokenExpiry::Unknown,
    };
    let claims: serde_json::Value = match serde_json::from_slice(&bytes) {
        Ok(claims) => claims,
        Err(_) => return TokenExpiry::Unknown,
    };

    match claims.get("exp") {
        None | Some(serde_json::Value::Null) => TokenExpiry::Never,
        Some(exp) => exp
            .as_i64()
            .or_else(|| exp.as_f64().map(|f| f as i64))
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(TokenExpiry::At)
            .unwrap_or(TokenExpiry::Unknown),
    }
}

/// A bearer credential for one SigNoz server.
#[derive(Debug, Clone)]
pub struct Session {
    token: SecretString,
    email: Option<String>,
    base_url: String,
    expiry: TokenExpiry,
}

impl Session {
    pub fn new(token: SecretString, base_url: impl Into<String>, email: Option<String>) -> Self {
        let expiry = token_expiry(token.expose_secret());
        Self {
            token,
            email,
            base_url: base_url.into(),
            expiry,
        }
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn expiry(&self) -> TokenExpiry {
        self.expiry
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.expiry {
            TokenExpiry::At(at) => Some(at),
            _ => None,
        }
    }

    /// Whether the token should be replaced before use.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            TokenExpiry::Never => false,
            TokenExpiry::At(exp) => now + Duration::seconds(TOKEN_EXPIRY_BUFFER_SECS) >= exp,
            TokenExpiry::Unknown => true,
        }
    }
}
