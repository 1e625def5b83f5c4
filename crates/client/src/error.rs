//! Error types for the SigNoz client.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during SigNoz client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP transport error (TLS, timeout, body decode).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from the SigNoz API.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// The bearer token is past its expiry.
    #[error("Session expired, please login again")]
    SessionExpired,

    /// The client has no session to authenticate with.
    #[error("No token found. Please login first or provide a token.")]
    NotAuthenticated,

    /// Response body did not have the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// The server could not be reached at all.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// HTTP 429 persisted through every configured retry.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be formed from the given input.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse classification of a failed API call, as recorded in batch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    Unauthorized,
    Invalid,
    Network,
    ServerError,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unauthorized => "unauthorized",
            Self::Invalid => "invalid",
            Self::Network => "network",
            Self::ServerError => "server error",
        };
        f.write_str(label)
    }
}

impl ClientError {
    /// Builds the error for a transport failure.
    ///
    /// Failures to establish a connection are kept apart from other transport
    /// errors so callers can treat an unreachable server as fatal.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() {
            let target = err
                .url()
                .map(|u| u.as_str().to_string())
                .unwrap_or_else(|| "server".to_string());
            Self::ConnectionRefused(target)
        } else {
            Self::HttpError(err)
        }
    }

    /// Classify this error for reporting.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::AuthFailed(_) | Self::SessionExpired | Self::NotAuthenticated => {
                ApiErrorKind::Unauthorized
            }
            Self::ApiError { status, .. } => match status {
                401 | 403 => ApiErrorKind::Unauthorized,
                429 => ApiErrorKind::ServerError,
                400..=499 => ApiErrorKind::Invalid,
                _ => ApiErrorKind::ServerError,
            },
            Self::HttpError(_) | Self::ConnectionRefused(_) => ApiErrorKind::Network,
            Self::MaxRetriesExceeded(_) | Self::InvalidResponse(_) => ApiErrorKind::ServerError,
            Self::InvalidUrl(_) | Self::InvalidRequest(_) => ApiErrorKind::Invalid,
        }
    }

    /// True when no further call against the same server can succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConnectionRefused(_))
    }

    /// The message without the URL and status decoration.
    pub fn short_message(&self) -> String {
        match self {
            Self::ApiError {
                status, message, ..
            } => format!("HTTP {status}: {message}"),
            other => other.to_string(),
        }
    }
}
