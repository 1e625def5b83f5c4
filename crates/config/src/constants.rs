//! Centralized constants for the sdm workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default SigNoz query-service / frontend URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3301";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default number of HTTP 429 back-off retries. Zero disables retrying.
pub const DEFAULT_MAX_RETRIES: usize = 0;

/// Upper bound accepted for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

// =============================================================================
// Session
// =============================================================================

/// Tokens whose `exp` falls within this many seconds are treated as expired.
pub const TOKEN_EXPIRY_BUFFER_SECS: i64 = 300;

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "signoz";

/// File name of the persisted session.
pub const CONFIG_FILE_NAME: &str = "config.json";

// =============================================================================
// Community dashboards
// =============================================================================

/// GitHub tree listing of the community dashboards repository.
pub const COMMUNITY_INDEX_URL: &str =
    "https://api.github.com/repos/SigNoz/dashboards/git/trees/main?recursive=1";

/// Raw content prefix for files in the community dashboards repository.
pub const COMMUNITY_RAW_BASE_URL: &str =
    "https://raw.githubusercontent.com/SigNoz/dashboards/main";
