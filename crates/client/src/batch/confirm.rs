//! Confirmation gate.

use thiserror::Error;
use tracing::debug;

use crate::batch::{Action, ConfirmPrompt, Policy};

/// The operator answered "no" (or could not answer).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Operation cancelled")]
pub struct ConfirmationDeclined;

/// The question asked before a batch of `count` targets.
pub fn confirmation_question(action: Action, count: usize) -> String {
    match action {
        Action::Remove => format!("Are you sure you want to delete {count} dashboard(s)?"),
        Action::Add => format!("Add {count} dashboards?"),
    }
}

/// Decide whether a batch may run.
///
/// Never asks when `assume_yes` is set or there is nothing to do. Otherwise
/// asks exactly once and returns the operator's answer.
pub fn should_proceed<P>(action: Action, count: usize, policy: &Policy, prompt: &P) -> bool
where
    P: ConfirmPrompt + ?Sized,
{
    if policy.assume_yes || count == 0 {
        debug!(%action, count, assume_yes = policy.assume_yes, "Confirmation not required");
        return true;
    }
    prompt.ask(&confirmation_question(action, count))
}

/// [`should_proceed`] as a `Result`, for `?` at the call site.
///
/// Only asks when the action needs confirmation for `count` targets.
pub fn require_confirmation<P>(
    action: Action,
    count: usize,
    policy: &Policy,
    prompt: &P,
) -> Result<(), ConfirmationDeclined>
where
    P: ConfirmPrompt + ?Sized,
{
    if !action.needs_confirmation(count) || should_proceed(action, count, policy, prompt) {
        Ok(())
    } else {
        Err(ConfirmationDeclined)
    }
}
