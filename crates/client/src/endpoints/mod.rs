//! REST API endpoint implementations.

mod auth;
mod dashboards;
mod request;

pub use auth::login;
pub use dashboards::{create_dashboard, delete_dashboard, list_dashboards};
pub use request::send_request_with_retry;
