//! Common types shared across SigNoz API models.
//!
//! SigNoz wraps most v1 responses as `{"status": "...", "data": ...}` and
//! failures as `{"status": "error", "error": "...", "errorType": "..."}`.

use serde::Deserialize;

/// Generic `{status, data}` response wrapper.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body returned by SigNoz on non-success responses.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
}

impl ApiErrorBody {
    /// Human-readable message, `None` when the body carried nothing useful.
    pub fn display_message(&self) -> Option<String> {
        let text = self
            .error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|s| !s.trim().is_empty())?;
        Some(match self.error_type.as_deref() {
            Some(kind) if !kind.is_empty() => format!("{text} ({kind})"),
            _ => text.to_string(),
        })
    }
}
