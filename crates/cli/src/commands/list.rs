//! `sdm ls`: list dashboards on the server.

use anyhow::Result;
use signoz_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, get_formatter, output_result};
use crate::progress::Spinner;
use crate::session::authenticated_client;

pub async fn run(
    config: Config,
    format: OutputFormat,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = cancellable!(authenticated_client(&config), cancel)?;

    let spinner = Spinner::new(!quiet, "Fetching dashboards...");
    let dashboards = cancellable!(client.list_dashboards(), cancel)?;
    spinner.finish();
    info!(count = dashboards.len(), "Listed dashboards");

    let output = get_formatter(format).format_dashboards(&dashboards)?;
    output_result(&output)
}
