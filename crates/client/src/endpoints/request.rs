//! Request sending with optional HTTP 429 back-off.
//!
//! Every SigNoz call goes through [`send_request_with_retry`], which turns
//! transport failures and non-success responses into [`ClientError`]s.
//! Retrying is opt-in: with `max_retries == 0` each request is sent once.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::ApiErrorBody;

/// Sends an HTTP request, retrying HTTP 429 responses up to `max_retries` times.
///
/// Back-off between attempts is exponential (1s, 2s, 4s = 2^attempt).
///
/// # Errors
///
/// - `ClientError::ConnectionRefused` when the server cannot be reached.
/// - `ClientError::ApiError` for any non-success status (429 included when no
///   retries are configured).
/// - `ClientError::MaxRetriesExceeded` when 429 persists through every retry.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                let response = builder.send().await.map_err(ClientError::from_transport)?;
                return check_status(response).await;
            }
        };

        let response = attempt_builder
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        if response.status().as_u16() == 429 && max_retries > 0 {
            if attempt < max_retries {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    attempt = attempt + 1,
                    max_retries = max_retries + 1,
                    backoff_secs = backoff_secs,
                    "Rate limited (HTTP 429), retrying with exponential backoff"
                );
                tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                continue;
            }
            debug!(
                attempts = attempt + 1,
                "Max retries exhausted for rate-limited request"
            );
            return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
        }

        if attempt > 0 {
            debug!(attempt = attempt + 1, "Request completed after retry");
        }
        return check_status(response).await;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Passes successful responses through and converts the rest into `ApiError`.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.display_message())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        });

    Err(ClientError::ApiError {
        status: status.as_u16(),
        url,
        message,
    })
}
