//! Dashboard management endpoints.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::{ApiEnvelope, Dashboard, RawDashboard};

const DASHBOARDS_PATH: &str = "/api/v1/dashboards";

/// Builds `<base>/api/v1/dashboards/<id>` with `id` as one escaped path segment.
fn dashboard_url(base_url: &str, id: &str) -> Result<String> {
    let mut url = url::Url::parse(&format!("{}{}", base_url, DASHBOARDS_PATH))
        .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?
        .push(id);
    Ok(url.to_string())
}

/// Pulls the entry list out of either `{status, data: [...]}` or a bare array.
fn dashboard_entries(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut map) => {
            if map.get("status").and_then(Value::as_str) == Some("error") {
                let message = map
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string();
                return Err(ClientError::InvalidResponse(message));
            }
            match map.remove("data") {
                Some(Value::Array(entries)) => Ok(entries),
                Some(Value::Null) | None => Ok(Vec::new()),
                Some(_) => Err(ClientError::InvalidResponse(
                    "dashboard list `data` is not an array".to_string(),
                )),
            }
        }
        _ => Err(ClientError::InvalidResponse(
            "unexpected dashboard list payload".to_string(),
        )),
    }
}

/// Converts list entries, skipping (and logging) the ones that cannot be used.
fn parse_dashboards(entries: Vec<Value>) -> Vec<Dashboard> {
    let mut dashboards = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let raw = match serde_json::from_value::<RawDashboard>(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed dashboard entry");
                continue;
            }
        };
        match raw.into_dashboard() {
            Some(dashboard) => dashboards.push(dashboard),
            None => warn!(index, "Skipping dashboard entry without an identifier"),
        }
    }
    dashboards
}

/// List all dashboards, in server order.
pub async fn list_dashboards(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    max_retries: usize,
) -> Result<Vec<Dashboard>> {
    let url = format!("{}{}", base_url, DASHBOARDS_PATH);
    let builder = client.get(&url).bearer_auth(auth_token);
    let response = send_request_with_retry(builder, max_retries).await?;

    let body: Value = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("dashboard list: {e}")))?;

    let dashboards = parse_dashboards(dashboard_entries(body)?);
    debug!(count = dashboards.len(), "Listed dashboards");
    Ok(dashboards)
}

/// Create a dashboard from a full definition.
pub async fn create_dashboard(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    definition: &Value,
    max_retries: usize,
) -> Result<Dashboard> {
    let url = format!("{}{}", base_url, DASHBOARDS_PATH);
    let builder = client.post(&url).bearer_auth(auth_token).json(definition);
    let response = send_request_with_retry(builder, max_retries).await?;

    let envelope: ApiEnvelope<RawDashboard> = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("create response: {e}")))?;

    if envelope.status.as_deref() == Some("error") {
        return Err(ClientError::InvalidResponse(
            envelope
                .error
                .unwrap_or_else(|| "dashboard creation failed".to_string()),
        ));
    }

    let mut dashboard = envelope
        .data
        .and_then(RawDashboard::into_dashboard)
        .ok_or_else(|| {
            ClientError::InvalidResponse("create response did not include a dashboard id".into())
        })?;

    // Some servers echo only the identifier.
    if dashboard.title.is_empty()
        && let Some(title) = Dashboard::title_of(definition)
    {
        dashboard.title = title.to_string();
    }
    if dashboard.definition.is_null() {
        dashboard.definition = definition.clone();
    }

    debug!(id = %dashboard.id, title = %dashboard.title, "Created dashboard");
    Ok(dashboard)
}

/// Delete a dashboard by id. An unknown id fails with HTTP 404.
pub async fn delete_dashboard(
    client: &Client,
    base_url: &str,
    auth_token: &str,
    id: &str,
    max_retries: usize,
) -> Result<()> {
    let url = dashboard_url(base_url, id)?;
    let builder = client.delete(&url).bearer_auth(auth_token);
    send_request_with_retry(builder, max_retries).await?;

    debug!(id, "Deleted dashboard");
    Ok(())
}
