//! Loading dashboard definitions from files and URLs.
//!
//! This module is responsible for:
//! - Telling local paths from `http(s)://` references
//! - Rewriting GitHub `blob` page URLs to their raw-content form
//! - Reading and parsing the definition as JSON
//!
//! # What this module does NOT handle:
//! - Validating the dashboard schema (the server rejects what it cannot accept)
//!
//! # Invariants
//! - A successful fetch always yields parsed JSON.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::batch::SourceFetcher;

/// Why a source could not be turned into a definition.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    #[error("Invalid JSON in {reference}: {message}")]
    InvalidJson { reference: String, message: String },
}

/// True for `http://` and `https://` references.
pub fn is_remote(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Rewrite `https://github.com/<owner>/<repo>/blob/<ref>/<path>` to
/// `https://raw.githubusercontent.com/<owner>/<repo>/<ref>/<path>`.
///
/// Any other URL is returned unchanged.
pub fn normalize_github_url(reference: &str) -> String {
    let Ok(url) = url::Url::parse(reference) else {
        return reference.to_string();
    };
    if url.host_str() != Some("github.com") {
        return reference.to_string();
    }
    let segments: Vec<&str> = match url.path_segments() {
        Some(s) => s.collect(),
        None => return reference.to_string(),
    };
    match segments.as_slice() {
        [owner, repo, "blob", git_ref, rest @ ..] if !rest.is_empty() => format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            owner,
            repo,
            git_ref,
            rest.join("/")
        ),
        _ => reference.to_string(),
    }
}

fn parse_definition(reference: &str, body: &str) -> Result<Value, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::InvalidJson {
        reference: reference.to_string(),
        message: e.to_string(),
    })
}

/// [`SourceFetcher`] for local files and HTTP(S) URLs.
#[derive(Debug, Clone)]
pub struct HttpSourceFetcher {
    http: reqwest::Client,
}

impl HttpSourceFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn fetch_url(&self, reference: &str) -> Result<Value, FetchError> {
        let url = normalize_github_url(reference);
        if url != reference {
            debug!(from = reference, to = %url, "Rewrote GitHub URL to raw content");
        }

        let download_error = |message: String| FetchError::Download {
            url: url.clone(),
            message,
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(download_error(format!("HTTP {}", status.as_u16())));
        }
        let body = response
            .text()
            .await
            .map_err(|e| download_error(e.to_string()))?;
        parse_definition(reference, &body)
    }

    async fn fetch_file(&self, reference: &str) -> Result<Value, FetchError> {
        let path = Path::new(reference);
        let body = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FetchError::NotFound(reference.to_string())
            } else {
                FetchError::Read {
                    path: reference.to_string(),
                    source: e,
                }
            }
        })?;
        parse_definition(reference, &body)
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch(&self, reference: &str) -> Result<Value, FetchError> {
        if is_remote(reference) {
            self.fetch_url(reference).await
        } else {
            self.fetch_file(reference).await
        }
    }
}
