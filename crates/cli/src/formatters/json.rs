//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format all command results as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Human-oriented messages (the table formatter owns those).

use crate::formatters::{ConfigView, Formatter};
use anyhow::Result;
use serde::Serialize;
use signoz_client::{CommunityDashboard, Dashboard, OperationReport};

/// JSON formatter.
pub struct JsonFormatter;

#[derive(Serialize)]
struct IndexedEntry<'a> {
    index: usize,
    #[serde(flatten)]
    entry: &'a CommunityDashboard,
}

impl Formatter for JsonFormatter {
    fn format_dashboards(&self, dashboards: &[Dashboard]) -> Result<String> {
        Ok(serde_json::to_string_pretty(dashboards)?)
    }

    fn format_report(&self, report: &OperationReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_config(&self, view: &ConfigView) -> Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }

    fn format_community(&self, entries: &[CommunityDashboard]) -> Result<String> {
        let indexed: Vec<IndexedEntry<'_>> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| IndexedEntry { index: i + 1, entry })
            .collect();
        Ok(serde_json::to_string_pretty(&indexed)?)
    }
}
