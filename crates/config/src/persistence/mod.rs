//! Persistence of the SigNoz login session.
//!
//! Responsibilities:
//! - Resolve the session file location.
//! - Read and write the cached session (`StoredSession`) to disk.
//! - Backup corrupt session files instead of failing startup.
//!
//! Does NOT handle:
//! - Loading environment variables (see `loader`).
//! - Deciding whether a cached token is still usable (see client crate).
//!
//! Invariants:
//! - Writes are atomic (temp file + rename) and the file is owner-only on Unix.
//! - A corrupt session file is moved aside and treated as "no session".

use std::path::{Path, PathBuf};

mod path;
mod session;

pub use session::{SessionStore, SessionStoreError, StoredSession};

pub(crate) use path::default_session_path;

/// Moves a corrupt file aside to `<name>.corrupt.<unix-seconds>`.
///
/// Returns the backup path on success.
pub(crate) fn create_corrupt_backup(path: &Path) -> Result<PathBuf, std::io::Error> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let backup_path = path.with_extension(format!("corrupt.{}", timestamp));
    std::fs::rename(path, &backup_path)?;

    Ok(backup_path)
}
