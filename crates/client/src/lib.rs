//! SigNoz REST API client and dashboard batch engine.
//!
//! This crate provides a typed client for the SigNoz dashboard API, the
//! session model used to authenticate it, and the engine that resolves,
//! confirms and executes batch add/remove operations.

mod auth;
pub mod batch;
pub mod client;
pub mod community;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod sources;

pub use auth::{Session, TokenExpiry, token_expiry};
pub use batch::{
    Action, BatchError, ConfirmPrompt, ConfirmationDeclined, DashboardApi, OperationOutcome,
    OperationReport, OutcomeStatus, Policy, ProgressSink, Resolution, ResolutionError,
    SelectionExpression, SelectorResolver, SourceFetcher, Target,
};
pub use client::SignozClient;
pub use client::builder::SignozClientBuilder;
pub use community::{CommunityDashboard, list_community_dashboards};
pub use error::{ApiErrorKind, ClientError, Result};
pub use models::Dashboard;
pub use sources::{FetchError, HttpSourceFetcher};
