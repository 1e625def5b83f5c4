//! Authentication endpoints.

use reqwest::Client;
use tracing::debug;

use crate::endpoints::send_request_with_retry;
use crate::error::{ClientError, Result};
use crate::models::{LoginRequest, LoginResponse};

/// Exchange email and password for a JWT.
///
/// Rejected credentials surface as `ClientError::AuthFailed` carrying the
/// server's message.
pub async fn login(
    client: &Client,
    base_url: &str,
    email: &str,
    password: &str,
    max_retries: usize,
) -> Result<String> {
    debug!("Logging in to SigNoz as {}", email);

    let url = format!("{}/api/v1/login", base_url);
    let builder = client.post(&url).json(&LoginRequest { email, password });

    let response = match send_request_with_retry(builder, max_retries).await {
        Ok(response) => response,
        Err(ClientError::ApiError {
            status, message, ..
        }) if (400..500).contains(&status) && status != 429 => {
            return Err(ClientError::AuthFailed(message));
        }
        Err(e) => return Err(e),
    };

    let body: LoginResponse = response
        .json()
        .await
        .map_err(|e| ClientError::InvalidResponse(format!("login response: {e}")))?;

    body.access_jwt()
        .map(str::to_string)
        .ok_or_else(|| ClientError::AuthFailed("No access token in login response".to_string()))
}
