//! `sdm add`: create dashboards from JSON files, URLs, or the community index.
//!
//! Responsibilities:
//! - Load every source, confirm when more than one dashboard will be created,
//!   run the batch and print its report.
//! - `--browse`: list the community index and turn the user's selection into
//!   sources.
//!
//! Invariants:
//! - Sources that cannot be loaded are reported and never block the others.

use anyhow::{Context, Result};
use signoz_client::{
    Action, BatchError, CommunityDashboard, ConfirmationDeclined, HttpSourceFetcher, Policy,
    SelectionExpression, SelectorResolver, SignozClient, batch, list_community_dashboards,
};
use signoz_config::Config;
use signoz_config::constants::{COMMUNITY_INDEX_URL, COMMUNITY_RAW_BASE_URL};
use tracing::info;

use crate::cancellation::CancellationToken;
use crate::commands::finish_batch;
use crate::error::UsageError;
use crate::formatters::{Formatter, OutputFormat, TableFormatter};
use crate::interactive::{TerminalPrompt, parse_selection, prompt_text};
use crate::progress::{BatchProgress, Spinner};
use crate::session::authenticated_client;

const SELECTION_HELP: &str = "\
Selection options:
  - Single dashboard: enter the number (e.g. '1')
  - Multiple dashboards: comma-separated numbers (e.g. '1,3,5')
  - Range of dashboards: start-end numbers (e.g. '1-3')
  - Press Enter to cancel
";

pub async fn run(
    config: Config,
    sources: Vec<String>,
    browse: bool,
    policy: Policy,
    format: OutputFormat,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = cancellable!(authenticated_client(&config), cancel)?;

    let sources = if browse {
        match cancellable!(browse_community(&client, quiet), cancel)? {
            Some(picked) => picked,
            None => return Ok(()),
        }
    } else {
        sources
    };
    if sources.is_empty() {
        return Err(UsageError("Please provide at least one dashboard file to add".to_string()).into());
    }

    let fetcher = HttpSourceFetcher::new(client.http().clone());
    let spinner = Spinner::new(!quiet, "Loading dashboard definitions...");
    let resolver = SelectorResolver::new(&client, &fetcher);
    let selection = SelectionExpression::LocalSources(sources);
    let resolution = cancellable!(resolver.resolve(&selection), cancel)?;
    spinner.finish();

    let targets = resolution.targets;
    let unloaded = resolution.failures;

    batch::require_confirmation(Action::Add, targets.len(), &policy, &TerminalPrompt)?;

    info!(count = targets.len(), "Adding dashboards");
    let progress = BatchProgress::new(!quiet, targets.len(), "Adding", cancel);
    let result = batch::execute(Action::Add, targets, &client, &policy, &progress).await;
    progress.finish();

    let result = match result {
        Ok(mut report) => {
            report.add_resolution_failures(unloaded);
            Ok(report)
        }
        Err(BatchError::Aborted { mut report, source }) => {
            report.add_resolution_failures(unloaded);
            Err(BatchError::Aborted { report, source })
        }
    };
    finish_batch(result, format)
}

/// List the community index, ask for a selection, and return the chosen URLs.
///
/// `None` means the index has nothing to offer.
async fn browse_community(client: &SignozClient, quiet: bool) -> Result<Option<Vec<String>>> {
    let spinner = Spinner::new(!quiet, "Fetching community dashboards...");
    let entries = list_community_dashboards(client.http(), COMMUNITY_INDEX_URL, COMMUNITY_RAW_BASE_URL)
        .await
        .context("Failed to load the community dashboard index")?;
    spinner.finish();

    pick_sources(&entries, || prompt_text("Select dashboards"))
}

/// Show `entries` on stderr and turn the answer from `ask` into source URLs.
fn pick_sources<F>(entries: &[CommunityDashboard], ask: F) -> Result<Option<Vec<String>>>
where
    F: FnOnce() -> Result<String>,
{
    if entries.is_empty() {
        eprintln!("No community dashboards available");
        return Ok(None);
    }

    eprintln!("{}", TableFormatter.format_community(entries)?);
    eprint!("{SELECTION_HELP}");

    let input = ask()?;
    let picked = parse_selection(&input, entries.len()).map_err(|e| UsageError(e.to_string()))?;
    if picked.is_empty() {
        return Err(ConfirmationDeclined.into());
    }

    Ok(Some(
        picked
            .into_iter()
            .filter_map(|n| entries.get(n - 1))
            .map(|entry| entry.url.clone())
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExitCode, ExitCodeExt};

    fn entries() -> Vec<CommunityDashboard> {
        ["hostmetrics.json", "nginx.json", "redis.json"]
            .iter()
            .map(|name| CommunityDashboard {
                category: "infra".to_string(),
                name: name.to_string(),
                path: format!("infra/{name}"),
                url: format!("https://raw.example.com/infra/{name}"),
            })
            .collect()
    }

    #[test]
    fn test_empty_index_ends_without_asking() {
        let picked = pick_sources(&[], || panic!("must not prompt")).unwrap();
        assert!(picked.is_none());
    }

    #[test]
    fn test_selection_maps_to_urls() {
        let picked = pick_sources(&entries(), || Ok("1,3".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(
            picked,
            vec![
                "https://raw.example.com/infra/hostmetrics.json",
                "https://raw.example.com/infra/redis.json",
            ]
        );
    }

    #[test]
    fn test_empty_selection_is_declined() {
        let err = pick_sources(&entries(), || Ok(String::new())).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Declined);
    }

    #[test]
    fn test_out_of_range_selection_is_usage_error() {
        let err = pick_sources(&entries(), || Ok("9".to_string())).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::ValidationError);
    }
}
