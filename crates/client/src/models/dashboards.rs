//! Dashboard models for the SigNoz dashboard API.
//!
//! The API returns dashboards as `{uuid, data: {title, ...}, created_by, ...}`
//! where `data` is the full dashboard definition. Some server versions use a
//! string `id` in place of `uuid`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dashboard as returned by the API.
///
/// `id` is the identity; `title` is only used for matching and display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub definition: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Dashboard {
    /// Title of a dashboard definition, if it has one.
    pub fn title_of(definition: &Value) -> Option<&str> {
        definition.get("title").and_then(Value::as_str)
    }
}

/// Wire shape of a dashboard entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDashboard {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub updated_at: Option<Value>,
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RawDashboard {
    /// The dashboard identifier: `uuid` first, then a non-empty `id`.
    pub fn identifier(&self) -> Option<String> {
        self.uuid
            .as_ref()
            .filter(|u| !u.is_empty())
            .cloned()
            .or_else(|| self.id.as_ref().and_then(value_to_string))
    }

    /// Converts to a [`Dashboard`]; `None` when the entry has no identifier.
    pub fn into_dashboard(self) -> Option<Dashboard> {
        let id = self.identifier()?;
        let definition = self.data.unwrap_or(Value::Null);
        let title = Dashboard::title_of(&definition)
            .unwrap_or_default()
            .to_string();
        Some(Dashboard {
            id,
            title,
            definition,
            created_by: self.created_by.filter(|s| !s.is_empty()),
            created_at: self.created_at.as_ref().and_then(value_to_string),
            updated_at: self.updated_at.as_ref().and_then(value_to_string),
        })
    }
}
