//! Per-item outcomes and the aggregate batch report.
//!
//! # Invariants
//! - `succeeded_count + failed_count == attempted.len()`; the counters are
//!   only changed through [`OperationReport::record`].
//! - `halted_at` is set at most once, and only to an attempted target.
//! - A report is either halted or interrupted, never both.

use serde::Serialize;

use crate::batch::{Action, ResolutionFailure, Target};
use crate::error::{ApiErrorKind, ClientError};

/// Why one target failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReason {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl From<&ClientError> for FailureReason {
    fn from(err: &ClientError) -> Self {
        Self {
            kind: err.kind(),
            message: err.short_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Failure(FailureReason),
}

/// Result of applying the batch action to one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationOutcome {
    pub target: Target,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    /// Id assigned by the server when the action created a dashboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_id: Option<String>,
}

impl OperationOutcome {
    pub fn success(target: Target) -> Self {
        Self {
            target,
            status: OutcomeStatus::Success,
            created_id: None,
        }
    }

    pub fn created(target: Target, id: String) -> Self {
        Self {
            created_id: Some(id),
            ..Self::success(target)
        }
    }

    pub fn failure(target: Target, err: &ClientError) -> Self {
        Self {
            target,
            status: OutcomeStatus::Failure(err.into()),
            created_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Success)
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match &self.status {
            OutcomeStatus::Failure(reason) => Some(reason),
            OutcomeStatus::Success => None,
        }
    }
}

/// Aggregate result of one batch.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    action: Action,
    attempted: Vec<OperationOutcome>,
    succeeded_count: usize,
    failed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    halted_at: Option<Target>,
    not_attempted: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    interrupted: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    resolution_failures: Vec<ResolutionFailure>,
}

impl OperationReport {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            attempted: Vec::new(),
            succeeded_count: 0,
            failed_count: 0,
            halted_at: None,
            not_attempted: 0,
            interrupted: false,
            resolution_failures: Vec::new(),
        }
    }

    /// Append an outcome and update the counters.
    pub fn record(&mut self, outcome: OperationOutcome) {
        if outcome.is_success() {
            self.succeeded_count += 1;
        } else {
            self.failed_count += 1;
        }
        self.attempted.push(outcome);
    }

    /// Mark the batch as stopped by `target` with `remaining` targets left untried.
    pub fn halt(&mut self, target: Target, remaining: usize) {
        if self.halted_at.is_none() && !self.interrupted {
            self.halted_at = Some(target);
            self.not_attempted = remaining;
        }
    }

    /// Mark the batch as stopped by the operator before `remaining` targets ran.
    pub fn interrupt(&mut self, remaining: usize) {
        if self.halted_at.is_none() && !self.interrupted {
            self.interrupted = true;
            self.not_attempted = remaining;
        }
    }

    pub fn add_resolution_failures(&mut self, failures: impl IntoIterator<Item = ResolutionFailure>) {
        self.resolution_failures.extend(failures);
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn attempted(&self) -> &[OperationOutcome] {
        &self.attempted
    }

    pub fn succeeded_count(&self) -> usize {
        self.succeeded_count
    }

    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    pub fn halted_at(&self) -> Option<&Target> {
        self.halted_at.as_ref()
    }

    pub fn not_attempted(&self) -> usize {
        self.not_attempted
    }

    pub fn resolution_failures(&self) -> &[ResolutionFailure] {
        &self.resolution_failures
    }

    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }

    /// True when nothing failed, resolution included.
    pub fn is_success(&self) -> bool {
        self.failed_count == 0 && self.resolution_failures.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.is_success()
    }
}
