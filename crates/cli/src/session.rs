//! Session provider: turns configuration into an authenticated client.
//!
//! Responsibilities:
//! - Pick the bearer token for this invocation, in order: explicit token,
//!   cached session for the same server, fresh login with configured
//!   credentials.
//! - Persist sessions obtained by logging in.
//!
//! Does NOT handle:
//! - Re-authenticating mid-command; an expiring token fails the affected calls.
//!
//! Invariants:
//! - A cached session is only reused for the server it was issued by and
//!   while it is not within five minutes of expiry.
//! - An expired cached session with no credentials to renew it is reported
//!   as expired, not as missing.

use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use signoz_client::{ClientError, Session, SignozClient, TokenExpiry};
use signoz_config::{AuthStrategy, Config, SessionStore, StoredSession};
use tracing::{debug, info, warn};

/// What the session file offers for the configured server.
enum CachedSession {
    Usable(Session),
    Expired,
    Missing,
}

pub(crate) fn session_store(config: &Config) -> Result<SessionStore> {
    SessionStore::open(config.session_path.as_deref()).context("Failed to locate the session file")
}

/// Load the cached session; unreadable files are treated as absent.
pub(crate) fn load_stored(store: &SessionStore) -> Option<StoredSession> {
    match store.load() {
        Ok(stored) => stored,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable session file");
            None
        }
    }
}

fn cached_session(config: &Config, store: &SessionStore) -> CachedSession {
    let base_url = &config.connection.base_url;
    let Some(stored) = load_stored(store) else {
        return CachedSession::Missing;
    };
    if !stored.matches_base_url(base_url) {
        debug!(
            cached = stored.base_url.as_deref().unwrap_or_default(),
            requested = %base_url,
            "Cached session belongs to a different server"
        );
        return CachedSession::Missing;
    }

    let session = Session::new(stored.token, base_url.clone(), stored.email);
    if session.is_expired() {
        info!("Cached session has expired");
        return CachedSession::Expired;
    }
    CachedSession::Usable(session)
}

/// Log in with email and password and persist the new session.
pub(crate) async fn login_and_save(
    client: &mut SignozClient,
    store: &SessionStore,
    email: &str,
    password: &secrecy::SecretString,
) -> Result<Session> {
    let session = client.login(email, password).await?;
    let stored = StoredSession::new(
        session.token().clone(),
        session.email().map(str::to_string),
        Some(session.base_url().to_string()),
    );
    store
        .save(&stored)
        .with_context(|| format!("Failed to save session to {}", store.path().display()))?;
    debug!(path = %store.path().display(), "Saved session");
    Ok(session)
}

/// Build a client carrying the best available session.
///
/// # Errors
///
/// Returns [`ClientError::SessionExpired`] when the only session on file has
/// expired, and [`ClientError::NotAuthenticated`] when there is no token, no
/// cached session and no credentials to log in with.
pub(crate) async fn authenticated_client(config: &Config) -> Result<SignozClient> {
    let mut client = SignozClient::builder().from_config(config).build()?;

    if let Some(AuthStrategy::Token { token }) = config.auth.strategy() {
        let session = Session::new(
            token,
            config.connection.base_url.clone(),
            config.auth.email.clone(),
        );
        match session.expiry() {
            TokenExpiry::At(at) if session.is_expired() => {
                warn!(expires_at = %at, "The provided token is expired or about to expire");
            }
            TokenExpiry::Unknown => {
                debug!("The provided token is not a decodable JWT; sending as given");
            }
            _ => {}
        }
        debug!("Using the provided token");
        client.set_session(session);
        return Ok(client);
    }

    let store = session_store(config)?;
    let cached = cached_session(config, &store);
    if let CachedSession::Usable(session) = cached {
        debug!(
            email = session.email().unwrap_or_default(),
            "Using cached session"
        );
        client.set_session(session);
        return Ok(client);
    }

    if let Some(AuthStrategy::Credentials { email, password }) = config.auth.strategy() {
        info!(email = %email, "Logging in with configured credentials");
        login_and_save(&mut client, &store, &email, &password).await?;
        return Ok(client);
    }

    match cached {
        CachedSession::Expired => Err(ClientError::SessionExpired.into()),
        _ => Err(ClientError::NotAuthenticated.into()),
    }
}

/// First and last few characters of a token, for display.
pub(crate) fn truncate_token(token: &secrecy::SecretString) -> String {
    let raw = token.expose_secret();
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= 16 {
        return "*".repeat(chars.len().min(8));
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn config_with_store(dir: &tempfile::TempDir) -> Config {
        let mut config = Config::default();
        config.connection.base_url = "http://localhost:3301".to_string();
        config.session_path = Some(dir.path().join("config.json"));
        config
    }

    #[tokio::test]
    async fn test_explicit_token_wins() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with_store(&dir);
        config.auth.token = Some(SecretString::new("explicit".into()));

        let client = authenticated_client(&config).await.unwrap();
        assert_eq!(
            client.session().unwrap().token().expose_secret(),
            "explicit"
        );
    }

    #[tokio::test]
    async fn test_missing_everything_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store(&dir);

        let err = authenticated_client(&config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_cached_session_for_other_server_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store(&dir);
        SessionStore::new_with_path(config.session_path.clone().unwrap())
            .save(&StoredSession::new(
                SecretString::new("cached".into()),
                None,
                Some("https://other.example.com".to_string()),
            ))
            .unwrap();

        assert!(authenticated_client(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_expired_cached_session_without_credentials_is_expired() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store(&dir);
        // {"alg":"HS256"}.{"exp":1000000000}.sig
        let expired = "eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjEwMDAwMDAwMDB9.sig";
        SessionStore::new_with_path(config.session_path.clone().unwrap())
            .save(&StoredSession::new(
                SecretString::new(expired.into()),
                None,
                Some("http://localhost:3301".to_string()),
            ))
            .unwrap();

        let err = authenticated_client(&config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::SessionExpired)
        ));
    }

    #[test]
    fn test_truncate_token() {
        let long = SecretString::new("abcdefghijklmnopqrstuvwxyz".into());
        assert_eq!(truncate_token(&long), "abcdefgh...wxyz");
        let short = SecretString::new("abc".into());
        assert_eq!(truncate_token(&short), "***");
    }
}
