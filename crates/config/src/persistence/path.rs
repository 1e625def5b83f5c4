//! Path helpers for the session file location.
//!
//! Uses `directories` for platform-appropriate paths. Does NOT touch the
//! filesystem.

use std::path::PathBuf;

use super::SessionStoreError;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Returns the default path to the session file.
///
/// - Linux: `~/.config/signoz/config.json`
/// - macOS: `~/Library/Application Support/signoz/config.json`
/// - Windows: `%AppData%\signoz\config\config.json`
pub(crate) fn default_session_path() -> Result<PathBuf, SessionStoreError> {
    let proj_dirs = directories::ProjectDirs::from("", "", CONFIG_DIR_NAME)
        .ok_or(SessionStoreError::ConfigDirUnavailable)?;

    Ok(proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}
