//! CLI command implementations.

pub mod add;
pub mod completions;
pub mod config;
pub mod list;
pub mod login;
pub mod remove;

use anyhow::Result;
use signoz_client::{BatchError, OperationReport};

use crate::cancellation::Cancelled;
use crate::error::PartialFailure;
use crate::formatters::{OutputFormat, get_formatter, output_result};

/// Print the report of a finished or aborted batch and turn it into the
/// command result.
///
/// An interrupted report becomes [`Cancelled`]; a report with failures becomes
/// [`PartialFailure`]; an aborted batch keeps its fatal error so the exit code
/// reflects the cause.
pub(crate) fn finish_batch(
    result: std::result::Result<OperationReport, BatchError>,
    format: OutputFormat,
) -> Result<()> {
    let formatter = get_formatter(format);
    match result {
        Ok(report) => {
            output_result(&formatter.format_report(&report)?)?;
            if report.was_interrupted() {
                return Err(Cancelled.into());
            }
            if report.has_failures() {
                return Err(PartialFailure {
                    failed: report.failed_count() + report.resolution_failures().len(),
                    total: report.attempted().len() + report.resolution_failures().len(),
                }
                .into());
            }
            Ok(())
        }
        Err(err) => {
            output_result(&formatter.format_report(err.report())?)?;
            Err(err.into())
        }
    }
}
