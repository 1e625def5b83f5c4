//! Client-level session helpers.
//!
//! # Invariants
//! - [`SignozClient::login`] requires `&mut self` because it replaces the session.
//! - The bearer token is taken from the injected session as-is; expiry is the
//!   caller's decision (see [`Session::is_expired`]).

use crate::auth::Session;
use crate::client::SignozClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use secrecy::{ExposeSecret, SecretString};

impl SignozClient {
    /// Exchange credentials for a JWT and make it this client's session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] when the server rejects the credentials.
    pub async fn login(&mut self, email: &str, password: &SecretString) -> Result<Session> {
        let token = endpoints::login(
            &self.http,
            &self.base_url,
            email,
            password.expose_secret(),
            self.max_retries,
        )
        .await?;

        let session = Session::new(
            SecretString::new(token.into()),
            self.base_url.clone(),
            Some(email.to_string()),
        );
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Replace the session used for authenticated calls.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub(crate) fn bearer_token(&self) -> Result<&str> {
        self.session
            .as_ref()
            .map(|s| s.token().expose_secret())
            .ok_or(ClientError::NotAuthenticated)
    }
}
