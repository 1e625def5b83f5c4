//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map client, resolution and batch errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-10 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use signoz_client::{BatchError, ClientError, ConfirmationDeclined, ResolutionError};
use thiserror::Error;

/// Structured exit codes for sdm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed successfully (an empty batch included).
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Missing, rejected or expired credentials.
    ///
    /// Scripts should log in again or provide a fresh token.
    AuthenticationFailed = 2,

    /// The SigNoz server could not be reached.
    ConnectionError = 3,

    /// Dashboard or source not found.
    NotFound = 4,

    /// Invalid input or a request the server rejected as malformed.
    ValidationError = 5,

    /// Insufficient privileges (HTTP 403).
    PermissionDenied = 6,

    /// HTTP 429 Too Many Requests.
    RateLimited = 7,

    /// HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// The batch ran but at least one dashboard failed.
    PartialFailure = 9,

    /// The operator declined the confirmation prompt.
    Declined = 10,

    /// SIGINT/Ctrl+C (128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed(_)
            | ClientError::SessionExpired
            | ClientError::NotAuthenticated => ExitCode::AuthenticationFailed,

            ClientError::ConnectionRefused(_) | ClientError::InvalidUrl(_) => {
                ExitCode::ConnectionError
            }

            ClientError::ApiError { status, .. } => match status {
                401 => ExitCode::AuthenticationFailed,
                403 => ExitCode::PermissionDenied,
                404 => ExitCode::NotFound,
                429 => ExitCode::RateLimited,
                502..=504 => ExitCode::ServiceUnavailable,
                400..=499 => ExitCode::ValidationError,
                _ => ExitCode::GeneralError,
            },

            ClientError::InvalidRequest(_) | ClientError::InvalidResponse(_) => {
                ExitCode::ValidationError
            }

            ClientError::MaxRetriesExceeded(_) => ExitCode::RateLimited,

            ClientError::HttpError(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }
        }
    }
}

/// A batch that finished with failed items.
///
/// The report has already been printed; this only carries the exit status.
#[derive(Error, Debug)]
#[error("{failed} of {total} dashboard(s) failed")]
pub struct PartialFailure {
    pub failed: usize,
    pub total: usize,
}

/// Invalid command-line input detected before any request.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct UsageError(pub String);

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no known error is found in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if cause.is::<ConfirmationDeclined>() {
                return ExitCode::Declined;
            }
            if cause.is::<PartialFailure>() {
                return ExitCode::PartialFailure;
            }
            if cause.is::<UsageError>() {
                return ExitCode::ValidationError;
            }
            if let Some(ResolutionError::InvalidPattern { .. }) =
                cause.downcast_ref::<ResolutionError>()
            {
                return ExitCode::ValidationError;
            }
            if let Some(BatchError::Aborted { source, .. }) = cause.downcast_ref::<BatchError>() {
                return ExitCode::from(source);
            }
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
        }

        ExitCode::GeneralError
    }
}
