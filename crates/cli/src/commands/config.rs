//! `sdm cfg`: show the saved session.

use anyhow::Result;
use signoz_config::Config;

use crate::formatters::{ConfigView, OutputFormat, get_formatter, output_result};
use crate::session::{load_stored, session_store, truncate_token};

pub fn run(config: &Config, format: OutputFormat) -> Result<()> {
    let store = session_store(config)?;
    let stored = load_stored(&store);

    let view = match stored {
        Some(stored) => ConfigView {
            token: Some(truncate_token(&stored.token)),
            email: stored.email,
            base_url: stored.base_url,
            last_login: stored.last_login,
            config_location: store.path().to_path_buf(),
        },
        None => ConfigView {
            email: None,
            base_url: None,
            last_login: None,
            token: None,
            config_location: store.path().to_path_buf(),
        },
    };

    output_result(&get_formatter(format).format_config(&view)?)
}
