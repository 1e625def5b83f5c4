//! Ctrl+C cancellation for running commands.
//!
//! Responsibilities:
//! - Provide a clonable cancellation token passed through command handlers.
//! - Define the `Cancelled` error recognised by `main` (exit code 130).
//! - Offer `cancellable!` to race a future against the token.
//!
//! Does NOT handle:
//! - Installing the signal handler (done once in `main`).
//! - Undoing work: calls that completed before cancellation stay applied.
//!
//! Invariants:
//! - Once cancelled, the token stays cancelled.

use std::fmt;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the token (idempotent).
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    ///
    /// The `notified()` future is created before the flag is checked so a
    /// cancel racing with this call is not missed.
    pub async fn cancelled(&self) {
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// User-driven cancellation.
#[derive(Debug, Clone, Copy)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.is::<Cancelled>()
}

pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}

/// Await `$fut`, returning `Err(Cancelled)` from the enclosing function if
/// `$cancel` fires first.
macro_rules! cancellable {
    ($fut:expr, $cancel:expr) => {
        tokio::select! {
            res = $fut => res,
            _ = $cancel.cancelled() => {
                return Err($crate::cancellation::Cancelled.into());
            }
        }
    };
}
