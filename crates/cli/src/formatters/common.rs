//! Common utilities for formatters.
//!
//! Responsibilities:
//! - Standardized missing/null value handling.
//! - Writing formatted output to stdout.

use anyhow::Result;
use std::io::Write;

/// String representation for missing values in human-readable output.
pub const DEFAULT_MISSING_VALUE: &str = "N/A";

/// Format an optional string value, using the default missing value if None.
pub fn format_missing(opt: Option<&str>) -> &str {
    match opt {
        Some(s) if !s.is_empty() => s,
        _ => DEFAULT_MISSING_VALUE,
    }
}

/// Print formatted output to stdout, adding a trailing newline when missing.
pub fn output_result(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
