//! Sequential batch execution.
//!
//! This module is responsible for:
//! - Applying one [`Action`] to each target in resolved order
//! - Recording an [`OperationOutcome`] per attempted target
//! - Honouring [`Policy::skip_errors`] after a per-item failure
//!
//! # What this module does NOT handle:
//! - Choosing targets (see `selector`)
//! - Asking for confirmation (see `confirm`); callers gate before calling [`execute`]
//!
//! # Invariants
//! - At most one API call is in flight at a time.
//! - An unreachable server aborts the batch whatever `skip_errors` says; the
//!   partial report travels with the error.
//! - An empty target list never touches the API.
//! - [`ProgressSink::should_stop`] is polled before every target; a stop
//!   leaves the rest untried and is reported, not raised.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::batch::{
    Action, DashboardApi, OperationOutcome, OperationReport, Policy, ProgressSink, Target,
};
use crate::error::ClientError;

/// A failure that stopped the batch as a whole.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Batch aborted: {source}")]
    Aborted {
        report: Box<OperationReport>,
        #[source]
        source: ClientError,
    },
}

impl BatchError {
    /// The report as it stood when the batch was aborted.
    pub fn report(&self) -> &OperationReport {
        match self {
            Self::Aborted { report, .. } => report,
        }
    }

}

async fn apply<A>(action: Action, target: &Target, api: &A) -> Result<Option<String>, ClientError>
where
    A: DashboardApi + ?Sized,
{
    match (action, target) {
        (Action::Remove, Target::Dashboard { id, .. }) => api.delete(id).await.map(|()| None),
        (Action::Add, Target::Source { definition, .. }) => {
            api.create(definition).await.map(|d| Some(d.id))
        }
        (action, target) => Err(ClientError::InvalidRequest(format!(
            "cannot {action} {}",
            target.key()
        ))),
    }
}

/// Run `action` over `targets`, one at a time.
///
/// # Errors
///
/// Returns [`BatchError::Aborted`] only for errors that make every later call
/// pointless (the server cannot be reached). Per-item failures are recorded in
/// the returned report instead.
pub async fn execute<A, P>(
    action: Action,
    targets: Vec<Target>,
    api: &A,
    policy: &Policy,
    progress: &P,
) -> Result<OperationReport, BatchError>
where
    A: DashboardApi + ?Sized,
    P: ProgressSink + ?Sized,
{
    let mut report = OperationReport::new(action);
    let total = targets.len();
    if total == 0 {
        debug!(%action, "Nothing to do");
        return Ok(report);
    }

    info!(%action, total, skip_errors = policy.skip_errors, "Starting batch");

    for (index, target) in targets.into_iter().enumerate() {
        if progress.should_stop() {
            warn!(%action, not_attempted = total - index, "Batch interrupted");
            report.interrupt(total - index);
            break;
        }
        progress.on_start(&target, index + 1, total);
        let remaining = total - index - 1;

        match apply(action, &target, api).await {
            Ok(created_id) => {
                debug!(item = %target, "Succeeded");
                let outcome = match created_id {
                    Some(id) => OperationOutcome::created(target, id),
                    None => OperationOutcome::success(target),
                };
                progress.on_tick(&outcome);
                report.record(outcome);
            }
            Err(err) => {
                warn!(item = %target, error = %err, "Failed");
                let outcome = OperationOutcome::failure(target.clone(), &err);
                progress.on_tick(&outcome);
                report.record(outcome);

                if err.is_fatal() {
                    report.halt(target, remaining);
                    return Err(BatchError::Aborted {
                        report: Box::new(report),
                        source: err,
                    });
                }
                if !policy.skip_errors {
                    report.halt(target, remaining);
                    break;
                }
            }
        }
    }

    info!(
        %action,
        succeeded = report.succeeded_count(),
        failed = report.failed_count(),
        not_attempted = report.not_attempted(),
        "Batch finished"
    );
    Ok(report)
}
