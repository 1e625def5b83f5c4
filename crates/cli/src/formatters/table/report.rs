//! Batch report formatter.
//!
//! Layout: one line per attempted dashboard, then resolution failures, then the
//! halt or interruption point (if any) and a count summary. The summary line is always present.

use signoz_client::{Action, OperationReport, OutcomeStatus};

fn past_tense(action: Action) -> &'static str {
    match action {
        Action::Add => "Added",
        Action::Remove => "Removed",
    }
}

pub fn format_report(report: &OperationReport) -> String {
    let verb = past_tense(report.action());
    let mut output = String::new();

    for outcome in report.attempted() {
        match &outcome.status {
            OutcomeStatus::Success => match &outcome.created_id {
                Some(id) => output.push_str(&format!("✓ {verb} {} (UUID: {id})\n", outcome.target)),
                None => output.push_str(&format!("✓ {verb} {}\n", outcome.target)),
            },
            OutcomeStatus::Failure(reason) => {
                output.push_str(&format!("✗ {}: {}\n", outcome.target, reason.message));
            }
        }
    }

    for failure in report.resolution_failures() {
        output.push_str(&format!(
            "✗ {}: could not be loaded: {}\n",
            failure.reference, failure.reason
        ));
    }

    if report.was_interrupted() {
        output.push_str(&format!(
            "Interrupted; {} dashboard(s) not attempted\n",
            report.not_attempted()
        ));
    }

    if let Some(target) = report.halted_at() {
        output.push_str(&format!(
            "Stopped after {target} failed; {} dashboard(s) not attempted (use --skip-errors to continue past failures)\n",
            report.not_attempted()
        ));
    }

    output.push_str(&format!(
        "Succeeded: {}, Failed: {}",
        report.succeeded_count(),
        report.failed_count()
    ));
    if !report.resolution_failures().is_empty() {
        output.push_str(&format!(
            ", Not loaded: {}",
            report.resolution_failures().len()
        ));
    }
    output.push('\n');
    output
}
