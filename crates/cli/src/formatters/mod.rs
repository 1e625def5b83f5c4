//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide the table and JSON renderings of every command result.
//! - Render the batch report (counts, per-item reasons, halt point).
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings; see `output_result`).
//! - Progress or prompts (see `progress` and `interactive`).
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior | Example |
//! |--------|---------------------|---------|
//! | JSON | Valid empty structure | `[]` |
//! | Table | Human message | `No dashboards found.` |

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use signoz_client::{CommunityDashboard, Dashboard, OperationReport};
use std::path::PathBuf;

mod common;
mod json;
mod table;

pub use crate::args::OutputFormat;
pub use common::output_result;
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// What `sdm cfg` shows about the saved session.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    pub email: Option<String>,
    pub base_url: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    /// Truncated token; `None` when no session is saved.
    pub token: Option<String>,
    pub config_location: PathBuf,
}

impl ConfigView {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    /// Format the dashboard list.
    fn format_dashboards(&self, dashboards: &[Dashboard]) -> Result<String>;

    /// Format the outcome of an add or remove batch.
    fn format_report(&self, report: &OperationReport) -> Result<String>;

    /// Format the saved configuration.
    fn format_config(&self, view: &ConfigView) -> Result<String>;

    /// Format the community index with 1-based selection numbers.
    fn format_community(&self, entries: &[CommunityDashboard]) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
