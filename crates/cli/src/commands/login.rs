//! `sdm login`: exchange email and password for a session and save it.
//!
//! Missing values are prompted for; the password prompt does not echo.

use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use signoz_client::SignozClient;
use signoz_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::error::UsageError;
use crate::interactive::{prompt_password, prompt_text};
use crate::progress::Spinner;
use crate::session::{login_and_save, session_store};

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn run(
    config: Config,
    email: Option<String>,
    password: Option<String>,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let email = match non_blank(email).or_else(|| non_blank(config.auth.email.clone())) {
        Some(email) => email,
        None => prompt_text("Email")?,
    };
    if email.trim().is_empty() {
        return Err(UsageError("Email is required to login".to_string()).into());
    }

    let password = match non_blank(password) {
        Some(password) => SecretString::new(password.into()),
        None => match config
            .auth
            .password
            .clone()
            .filter(|p| !p.expose_secret().is_empty())
        {
            Some(password) => password,
            None => SecretString::new(prompt_password("Password")?.into()),
        },
    };
    if password.expose_secret().is_empty() {
        return Err(UsageError("Password is required to login".to_string()).into());
    }

    let mut client = SignozClient::builder().from_config(&config).build()?;
    let store = session_store(&config)?;
    info!(email = %email, url = %client.base_url(), "Logging in");

    let spinner = Spinner::new(!quiet, "Logging in...");
    let session = cancellable!(login_and_save(&mut client, &store, email.trim(), &password), cancel)?;
    spinner.finish();

    if let Some(expires_at) = session.expires_at() {
        info!(expires_at = %expires_at, "Session token expiry");
    }
    println!("Login successful!");
    println!("Token saved to {}", store.path().display());
    Ok(())
}
