//! Authentication models for the SigNoz login API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response. Older servers return the JWT at the top level, newer ones
/// nest it under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "accessJwt", default)]
    access_jwt: Option<String>,
    #[serde(default)]
    data: Option<LoginData>,
}

#[derive(Debug, Clone, Deserialize)]
struct LoginData {
    #[serde(rename = "accessJwt", default)]
    access_jwt: Option<String>,
}

impl LoginResponse {
    pub fn access_jwt(&self) -> Option<&str> {
        self.access_jwt
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.access_jwt.as_deref()))
            .filter(|t| !t.is_empty())
    }
}
