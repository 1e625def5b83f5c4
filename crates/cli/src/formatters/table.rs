//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format results as tab-separated tables and short human summaries.
//!
//! Does NOT handle:
//! - Other output formats.
//! - Terminal colours (output is plain text so it survives pipes).

use crate::formatters::{ConfigView, Formatter};
use anyhow::Result;
use signoz_client::{CommunityDashboard, Dashboard, OperationReport};

mod community;
mod config;
mod dashboards;
mod report;

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_dashboards(&self, dashboards: &[Dashboard]) -> Result<String> {
        Ok(dashboards::format_dashboards(dashboards))
    }

    fn format_report(&self, report: &OperationReport) -> Result<String> {
        Ok(report::format_report(report))
    }

    fn format_config(&self, view: &ConfigView) -> Result<String> {
        Ok(config::format_config(view))
    }

    fn format_community(&self, entries: &[CommunityDashboard]) -> Result<String> {
        Ok(community::format_community(entries))
    }
}
