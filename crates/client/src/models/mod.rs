//! Data models for SigNoz API responses.
//!
//! Types are organized by resource in submodules and re-exported here.

pub mod auth;
pub mod common;
pub mod dashboards;

pub use auth::{LoginRequest, LoginResponse};
pub use common::{ApiEnvelope, ApiErrorBody};
pub use dashboards::{Dashboard, RawDashboard};
