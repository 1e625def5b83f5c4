//! Community dashboard index (the public `SigNoz/dashboards` repository).
//!
//! The index is the repository's git tree. Every `.json` blob that lives in a
//! category directory is one installable dashboard.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};

/// One installable dashboard from the community repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityDashboard {
    /// Top-level directory, e.g. `hostmetrics`.
    pub category: String,
    /// File name without the category, e.g. `hostmetrics-k8s.json`.
    pub name: String,
    /// Path inside the repository.
    pub path: String,
    /// Raw download URL.
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

fn is_hidden(segment: &str) -> bool {
    segment.starts_with('.')
}

/// Turn a git tree listing into sorted community entries.
fn parse_index(body: TreeResponse, raw_base: &str) -> Vec<CommunityDashboard> {
    if body.truncated {
        debug!("Community index listing was truncated by the server");
    }
    let raw_base = raw_base.trim_end_matches('/');

    let mut entries: Vec<CommunityDashboard> = body
        .tree
        .into_iter()
        .filter(|e| e.kind == "blob" && e.path.to_ascii_lowercase().ends_with(".json"))
        .filter_map(|e| {
            let (category, name) = e.path.split_once('/')?;
            if is_hidden(category) || e.path.split('/').any(is_hidden) {
                return None;
            }
            Some(CommunityDashboard {
                category: category.to_string(),
                name: name.to_string(),
                url: format!("{}/{}", raw_base, e.path),
                path: e.path,
            })
        })
        .collect();

    entries.sort_by(|a, b| (&a.category, &a.path).cmp(&(&b.category, &b.path)));
    entries
}

/// Fetch the community index.
///
/// # Errors
///
/// Returns [`ClientError::ConnectionRefused`]/[`ClientError::HttpError`] for
/// transport failures and [`ClientError::ApiError`] for a non-success status.
pub async fn list_community_dashboards(
    http: &Client,
    index_url: &str,
    raw_base: &str,
) -> Result<Vec<CommunityDashboard>> {
    let response = http
        .get(index_url)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .send()
        .await
        .map_err(ClientError::from_transport)?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ClientError::ApiError {
            status: status.as_u16(),
            url: index_url.to_string(),
            message: if message.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                message
            },
        });
    }

    let body: TreeResponse = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("community index: {e}")))?;

    let entries = parse_index(body, raw_base);
    debug!(count = entries.len(), "Loaded community dashboard index");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> TreeResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_index_filters_and_sorts() {
        let body = tree(json!({
            "tree": [
                {"path": "README.md", "type": "blob"},
                {"path": "nginx", "type": "tree"},
                {"path": "nginx/nginx.json", "type": "blob"},
                {"path": "hostmetrics/hostmetrics-k8s.json", "type": "blob"},
                {"path": "hostmetrics/hostmetrics.json", "type": "blob"},
                {"path": "top-level.json", "type": "blob"},
                {"path": ".github/workflow.json", "type": "blob"},
                {"path": "nginx/assets/screenshot.png", "type": "blob"}
            ],
            "truncated": false
        }));

        let entries = parse_index(body, "https://raw.example.com/main/");
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "hostmetrics/hostmetrics-k8s.json",
                "hostmetrics/hostmetrics.json",
                "nginx/nginx.json",
            ]
        );
        assert_eq!(entries[2].category, "nginx");
        assert_eq!(entries[2].name, "nginx.json");
        assert_eq!(entries[2].url, "https://raw.example.com/main/nginx/nginx.json");
    }

    #[test]
    fn test_parse_index_tolerates_missing_tree() {
        let entries = parse_index(tree(json!({})), "https://raw.example.com");
        assert!(entries.is_empty());
    }
}
