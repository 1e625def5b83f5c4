//! Batch operation engine for dashboard add/remove.
//!
//! This module is responsible for:
//! - Resolving a [`SelectionExpression`] into an ordered list of [`Target`]s
//! - Gating bulk or destructive work behind a single confirmation
//! - Executing one action per target, sequentially, and recording every outcome
//!
//! # What this module does NOT handle:
//! - HTTP transport (reached through [`DashboardApi`])
//! - Reading definitions from disk or the network (reached through [`SourceFetcher`])
//! - Terminal interaction or rendering (reached through [`ConfirmPrompt`] and [`ProgressSink`])
//!
//! # Invariants
//! - Resolution never mutates server state.
//! - The confirmation gate runs once per batch, before the first mutation.
//! - Targets are processed in resolved order, one call in flight at a time.
//! - `succeeded_count + failed_count == attempted.len()` for every report.
//! - A stop request is honoured between targets, never mid-call.

mod confirm;
mod executor;
mod pattern;
mod report;
mod selector;

#[cfg(test)]
pub(crate) mod fakes;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::models::Dashboard;
use crate::sources::FetchError;

pub use confirm::{ConfirmationDeclined, confirmation_question, require_confirmation, should_proceed};
pub use executor::{BatchError, execute};
pub use pattern::TitlePattern;
pub use report::{FailureReason, OperationOutcome, OperationReport, OutcomeStatus};
pub use selector::{
    Resolution, ResolutionError, ResolutionFailure, SelectionExpression, SelectorResolver, Target,
};

/// Dashboard operations the engine needs from the server.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Every dashboard visible to the session, in server order.
    async fn list(&self) -> Result<Vec<Dashboard>>;

    /// Create a dashboard from a full definition.
    async fn create(&self, definition: &Value) -> Result<Dashboard>;

    /// Delete one dashboard by id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Loads a dashboard definition from a file path or URL.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, reference: &str) -> std::result::Result<Value, FetchError>;
}

/// Yes/no question put to the operator.
///
/// Implementations must answer `false` when no answer can be obtained
/// (closed stdin, non-interactive session, I/O error).
pub trait ConfirmPrompt {
    fn ask(&self, question: &str) -> bool;
}

/// Receives per-target progress while a batch runs.
pub trait ProgressSink {
    /// Called before the action for `target` is sent. `position` is 1-based.
    fn on_start(&self, _target: &Target, _position: usize, _total: usize) {}

    /// Called once per attempted target with its outcome.
    fn on_tick(&self, outcome: &OperationOutcome);

    /// Checked before each target. Returning `true` stops the batch without
    /// touching the remaining targets; a call already in flight completes.
    fn should_stop(&self) -> bool {
        false
    }
}

impl ProgressSink for () {
    fn on_tick(&self, _outcome: &OperationOutcome) {}
}

/// The mutation applied to every target of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Add,
    Remove,
}

impl Action {
    /// Removals are always confirmed; additions only when more than one.
    pub fn needs_confirmation(self, target_count: usize) -> bool {
        match self {
            Self::Remove => target_count > 0,
            Self::Add => target_count > 1,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Remove => "remove",
        })
    }
}

/// Per-batch behaviour switches. Fixed for the lifetime of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// Keep going after a per-item failure.
    pub skip_errors: bool,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
}
