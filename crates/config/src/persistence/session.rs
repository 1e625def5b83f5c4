//! On-disk cache of the last successful login.
//!
//! The file holds `{token, email, base_url, last_login}` as pretty JSON.
//! Older files written without `base_url`, or with a naive local
//! `last_login` timestamp, are still accepted.

use chrono::{DateTime, NaiveDateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{create_corrupt_backup, default_session_path};

mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Accepts RFC 3339 timestamps and naive ISO-8601 ones (taken as UTC).
mod lenient_timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| parse(&s)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// A cached login, as persisted between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(with = "secret_string")]
    pub token: SecretString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Server the token was issued by. Missing in files written by older clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, with = "lenient_timestamp")]
    pub last_login: Option<DateTime<Utc>>,
}

impl StoredSession {
    pub fn new(token: SecretString, email: Option<String>, base_url: Option<String>) -> Self {
        Self {
            token,
            email,
            base_url,
            last_login: Some(Utc::now()),
        }
    }

    /// True when the session was issued for `base_url`, or records no server.
    pub fn matches_base_url(&self, base_url: &str) -> bool {
        match &self.base_url {
            Some(stored) => stored.trim_end_matches('/') == base_url.trim_end_matches('/'),
            None => true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Unable to determine config directory")]
    ConfigDirUnavailable,

    #[error("Failed to read session file at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write session file at {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads and writes the session file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at the platform default location.
    pub fn new() -> Result<Self, SessionStoreError> {
        Ok(Self {
            path: default_session_path()?,
        })
    }

    /// Store at an explicit location (tests, `--config-path`).
    pub fn new_with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `path` when given, else at the platform default location.
    pub fn open(path: Option<&Path>) -> Result<Self, SessionStoreError> {
        match path {
            Some(path) => Ok(Self::new_with_path(path.to_path_buf())),
            None => Self::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached session.
    ///
    /// Returns `Ok(None)` when no file exists, when the token is blank, or
    /// when the file is corrupt (it is moved aside first).
    pub fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SessionStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<StoredSession>(&content) {
            Ok(session) => {
                use secrecy::ExposeSecret;
                if session.token.expose_secret().trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(session))
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Session file is corrupt; ignoring it"
                );
                match create_corrupt_backup(&self.path) {
                    Ok(backup) => {
                        tracing::warn!(backup = %backup.display(), "Corrupt session file backed up")
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Failed to back up corrupt session file")
                    }
                }
                Ok(None)
            }
        }
    }

    /// Persist `session`, replacing any previous file atomically.
    pub fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        let write_err = |source| SessionStoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(session)?;
        let temp_path = self.path.with_extension("tmp");
        write_private(&temp_path, content.as_bytes()).map_err(write_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}
