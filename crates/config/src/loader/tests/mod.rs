//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests that touch process-global state (env, cwd) are `#[serial]`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

mod dotenv_tests;
