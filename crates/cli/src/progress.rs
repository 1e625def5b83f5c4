//! Progress indicators for the CLI.
//!
//! Responsibilities:
//! - Show a per-dashboard progress bar while a batch runs.
//! - Provide a spinner for single requests (listing, login, index download).
//! - Draw ALL progress output on STDERR so stdout stays machine-readable.
//!
//! Non-responsibilities:
//! - Deciding *when* progress is shown (`--quiet` is passed in by callers).
//! - Printing the final report (see `formatters`).

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use signoz_client::{OperationOutcome, ProgressSink, Target};
use std::time::Duration;

use crate::cancellation::CancellationToken;

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Progress bar over the targets of one batch. No-op when disabled.
///
/// Also relays Ctrl+C to the executor, so the batch stops between targets.
pub(crate) struct BatchProgress {
    pb: Option<ProgressBar>,
    cancel: CancellationToken,
}

impl BatchProgress {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, total: usize, verb: &str, cancel: &CancellationToken) -> Self {
        let cancel = cancel.clone();
        if !enabled || total == 0 {
            return Self { pb: None, cancel };
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(style("{spinner} {prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}").progress_chars("=>-"));
        pb.set_prefix(verb.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb: Some(pb), cancel }
    }

    pub(crate) fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl ProgressSink for BatchProgress {
    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn on_start(&self, target: &Target, _position: usize, _total: usize) {
        if let Some(pb) = &self.pb {
            pb.set_message(target.label().to_string());
        }
    }

    fn on_tick(&self, outcome: &OperationOutcome) {
        let Some(pb) = &self.pb else {
            return;
        };
        if let Some(reason) = outcome.failure_reason() {
            pb.println(format!("✗ {}: {}", outcome.target, reason.message));
        }
        pb.inc(1);
    }
}

impl Drop for BatchProgress {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

/// An indefinite spinner for short operations. No-op when disabled.
pub(crate) struct Spinner {
    pb: Option<ProgressBar>,
}

impl Spinner {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        if !enabled {
            return Self { pb: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(style("{spinner} {msg}"));
        pb.set_message(label.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb: Some(pb) }
    }

    pub(crate) fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signoz_client::ClientError;

    #[test]
    fn test_disabled_progress_is_noop() {
        let progress = BatchProgress::new(false, 3, "Removing", &CancellationToken::new());
        progress.on_start(&Target::dashboard("a"), 1, 3);
        progress.on_tick(&OperationOutcome::failure(
            Target::dashboard("a"),
            &ClientError::InvalidRequest("x".to_string()),
        ));
        progress.finish();
        assert!(progress.pb.is_none());
    }

    #[test]
    fn test_empty_batch_has_no_bar() {
        assert!(BatchProgress::new(true, 0, "Adding", &CancellationToken::new()).pb.is_none());
    }

    #[test]
    fn test_stop_follows_cancellation_token() {
        let cancel = CancellationToken::new();
        let progress = BatchProgress::new(false, 2, "Removing", &cancel);
        assert!(!progress.should_stop());
        cancel.cancel();
        assert!(progress.should_stop());
    }

    #[test]
    fn test_disabled_spinner_is_noop() {
        let spinner = Spinner::new(false, "Listing");
        spinner.finish();
        assert!(spinner.pb.is_none());
    }
}
