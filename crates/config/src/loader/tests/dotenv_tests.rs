//! Tests for dotenv loading behavior.
//!
//! Invariants / Assumptions:
//! - Tests must serialize mutations to process-global state (cwd/env).
//! - Error messages must never contain secret values from `.env` files.

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

#[test]
#[serial]
fn test_missing_dotenv_is_ok() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    temp_env::with_var_unset("DOTENV_DISABLED", || {
        assert!(ConfigLoader::new().load_dotenv().is_ok());
    });
}

#[test]
#[serial]
fn test_valid_dotenv_is_ok() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), "_SDM_DOTENV_MARKER=loaded\n").unwrap();

    temp_env::with_vars(
        [("DOTENV_DISABLED", None::<&str>), ("_SDM_DOTENV_MARKER", None)],
        || {
            assert!(ConfigLoader::new().load_dotenv().is_ok());
            assert_eq!(
                std::env::var("_SDM_DOTENV_MARKER").as_deref(),
                Ok("loaded")
            );
        },
    );
}

#[test]
#[serial]
fn test_invalid_dotenv_returns_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    temp_env::with_var_unset("DOTENV_DISABLED", || {
        match ConfigLoader::new().load_dotenv() {
            Err(ConfigError::DotenvParse { .. }) => {}
            Err(other) => panic!("expected DotenvParse, got {other}"),
            Ok(_) => panic!("expected DotenvParse, got Ok"),
        }
    });
}

#[test]
#[serial]
fn test_dotenv_parse_error_does_not_leak_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);
    let secret_value = "supersecret_password_12345";
    fs::write(
        temp_dir.path().join(".env"),
        format!("SIGNOZ_PASSWORD={secret_value}\nINVALID_LINE_WITHOUT_EQUALS"),
    )
    .unwrap();

    temp_env::with_vars(
        [("DOTENV_DISABLED", None::<&str>), ("SIGNOZ_PASSWORD", None)],
        || {
            let err = ConfigLoader::new()
                .load_dotenv()
                .err()
                .expect("invalid .env should fail");
            let message = err.to_string();
            assert!(!message.contains(secret_value), "leaked: {message}");
            assert!(message.contains(".env"));
            assert!(message.contains("DOTENV_DISABLED"));
        },
    );
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    for value in ["1", "true"] {
        temp_env::with_var("DOTENV_DISABLED", Some(value), || {
            assert!(
                ConfigLoader::new().load_dotenv().is_ok(),
                "DOTENV_DISABLED={value} should skip .env loading"
            );
        });
    }
}
