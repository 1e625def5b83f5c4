//! `sdm rm`: remove dashboards by id, title pattern, or all.
//!
//! Responsibilities:
//! - Resolve the selection, list the matches (pattern/all), confirm, then run
//!   the batch and print its report.
//!
//! Invariants:
//! - Nothing is deleted before the confirmation gate has passed.
//! - A resolution failure (listing, bad pattern) deletes nothing.

use anyhow::Result;
use signoz_client::{
    Action, HttpSourceFetcher, Policy, SelectionExpression, SelectorResolver, batch,
};
use signoz_config::Config;
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::finish_batch;
use crate::error::UsageError;
use crate::formatters::OutputFormat;
use crate::interactive::TerminalPrompt;
use crate::progress::BatchProgress;
use crate::session::authenticated_client;

pub async fn run(
    config: Config,
    selection: Option<SelectionExpression>,
    policy: Policy,
    format: OutputFormat,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let Some(selection) = selection else {
        return Err(UsageError(
            "Please provide at least one dashboard UUID to remove (or use --pattern / --all)"
                .to_string(),
        )
        .into());
    };

    let client = cancellable!(authenticated_client(&config), cancel)?;
    let fetcher = HttpSourceFetcher::new(client.http().clone());
    let resolver = SelectorResolver::new(&client, &fetcher);
    let resolution = cancellable!(resolver.resolve(&selection), cancel)?;
    let targets = resolution.targets;

    match &selection {
        SelectionExpression::TitlePattern(pattern) if targets.is_empty() => {
            eprintln!("No dashboards found matching pattern: {pattern}");
        }
        SelectionExpression::TitlePattern(_) | SelectionExpression::All => {
            if targets.is_empty() {
                eprintln!("No dashboards found to delete");
            } else {
                eprintln!("Matched dashboards to delete:");
                for target in &targets {
                    eprintln!("  - {target}");
                }
            }
        }
        _ => {}
    }

    batch::require_confirmation(Action::Remove, targets.len(), &policy, &TerminalPrompt)?;

    info!(count = targets.len(), "Removing dashboards");
    let progress = BatchProgress::new(!quiet, targets.len(), "Removing", cancel);
    let result = batch::execute(Action::Remove, targets, &client, &policy, &progress).await;
    progress.finish();

    finish_batch(result, format)
}
