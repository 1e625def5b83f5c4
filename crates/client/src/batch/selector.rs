//! Selection expressions and their resolution into batch targets.
//!
//! # Invariants
//! - `ExplicitIds` are returned verbatim, in order, duplicates included; the
//!   catalog is never queried for them.
//! - `TitlePattern` and `All` query the catalog exactly once and keep catalog order.
//! - A source that cannot be fetched is recorded as a [`ResolutionFailure`];
//!   the remaining sources are still resolved.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::batch::{DashboardApi, SourceFetcher, TitlePattern};
use crate::error::ClientError;
use crate::models::Dashboard;

/// How the operator chose the dashboards for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionExpression {
    ExplicitIds(Vec<String>),
    TitlePattern(String),
    All,
    LocalSources(Vec<String>),
}

/// One unit of work for the executor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    /// An existing dashboard, addressed by id.
    Dashboard {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    /// A definition loaded from a file or URL.
    Source {
        reference: String,
        #[serde(skip)]
        definition: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

impl Target {
    pub fn dashboard(id: impl Into<String>) -> Self {
        Self::Dashboard {
            id: id.into(),
            title: None,
        }
    }

    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        Self::Dashboard {
            id: dashboard.id.clone(),
            title: Some(dashboard.title.clone()).filter(|t| !t.is_empty()),
        }
    }

    pub fn source(reference: impl Into<String>, definition: Value) -> Self {
        let title = Dashboard::title_of(&definition).map(str::to_string);
        Self::Source {
            reference: reference.into(),
            definition,
            title,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Dashboard { title, .. } | Self::Source { title, .. } => title.as_deref(),
        }
    }

    /// Dashboard id or source reference.
    pub fn key(&self) -> &str {
        match self {
            Self::Dashboard { id, .. } => id,
            Self::Source { reference, .. } => reference,
        }
    }

    /// Short human label: the title when known, else the key.
    pub fn label(&self) -> &str {
        self.title().unwrap_or_else(|| self.key())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.title() {
            Some(title) => write!(f, "{} ({})", title, self.key()),
            None => f.write_str(self.key()),
        }
    }
}

/// A source that could not be turned into a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionFailure {
    pub reference: String,
    pub reason: String,
}

/// Result of resolving a selection.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub targets: Vec<Target>,
    pub failures: Vec<ResolutionFailure>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Errors that prevent a selection from being resolved at all.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The dashboard list could not be obtained.
    #[error("Failed to list dashboards: {0}")]
    CatalogUnavailable(#[source] ClientError),

    /// The title pattern is not usable.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Turns a [`SelectionExpression`] into targets.
pub struct SelectorResolver<'a, A: ?Sized, F: ?Sized> {
    catalog: &'a A,
    fetcher: &'a F,
}

impl<'a, A, F> SelectorResolver<'a, A, F>
where
    A: DashboardApi + ?Sized,
    F: SourceFetcher + ?Sized,
{
    pub fn new(catalog: &'a A, fetcher: &'a F) -> Self {
        Self { catalog, fetcher }
    }

    /// Resolve `expr` into an ordered target list.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::CatalogUnavailable`] when listing fails.
    /// - [`ResolutionError::InvalidPattern`] for an empty pattern.
    pub async fn resolve(&self, expr: &SelectionExpression) -> Result<Resolution, ResolutionError> {
        match expr {
            SelectionExpression::ExplicitIds(ids) => {
                for id in ids {
                    if uuid::Uuid::parse_str(id).is_err() {
                        warn!(id = %id, "Dashboard id is not a valid UUID, sending as given");
                    }
                }
                Ok(Resolution {
                    targets: ids.iter().map(Target::dashboard).collect(),
                    failures: Vec::new(),
                })
            }
            SelectionExpression::TitlePattern(raw) => {
                let pattern = TitlePattern::new(raw)?;
                let catalog = self.catalog().await?;
                let targets: Vec<Target> = catalog
                    .iter()
                    .filter(|d| pattern.matches(&d.title))
                    .map(Target::from_dashboard)
                    .collect();
                debug!(
                    pattern = pattern.as_str(),
                    matched = targets.len(),
                    total = catalog.len(),
                    "Resolved title pattern"
                );
                Ok(Resolution {
                    targets,
                    failures: Vec::new(),
                })
            }
            SelectionExpression::All => {
                let catalog = self.catalog().await?;
                Ok(Resolution {
                    targets: catalog.iter().map(Target::from_dashboard).collect(),
                    failures: Vec::new(),
                })
            }
            SelectionExpression::LocalSources(sources) => Ok(self.fetch_sources(sources).await),
        }
    }

    async fn catalog(&self) -> Result<Vec<Dashboard>, ResolutionError> {
        self.catalog
            .list()
            .await
            .map_err(ResolutionError::CatalogUnavailable)
    }

    async fn fetch_sources(&self, sources: &[String]) -> Resolution {
        let mut resolution = Resolution::default();
        for reference in sources {
            match self.fetcher.fetch(reference).await {
                Ok(definition) => resolution
                    .targets
                    .push(Target::source(reference.as_str(), definition)),
                Err(e) => {
                    warn!(reference = %reference, error = %e, "Skipping dashboard source");
                    resolution.failures.push(ResolutionFailure {
                        reference: reference.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::fakes::{FakeApi, FakeFetcher};
    use proptest::prelude::*;
    use serde_json::json;

    fn resolve_blocking(
        api: &FakeApi,
        fetcher: &FakeFetcher,
        expr: SelectionExpression,
    ) -> Result<Resolution, ResolutionError> {
        tokio_test::block_on(SelectorResolver::new(api, fetcher).resolve(&expr))
    }

    #[tokio::test]
    async fn test_explicit_ids_skip_catalog() {
        let api = FakeApi::with_titles(&["A", "B"]);
        let fetcher = FakeFetcher::default();
        let ids = vec!["x".to_string(), "y".to_string(), "x".to_string()];

        let resolution = SelectorResolver::new(&api, &fetcher)
            .resolve(&SelectionExpression::ExplicitIds(ids.clone()))
            .await
            .unwrap();

        let keys: Vec<&str> = resolution.targets.iter().map(Target::key).collect();
        assert_eq!(keys, vec!["x", "y", "x"]);
        assert_eq!(api.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_pattern_keeps_catalog_order() {
        let api = FakeApi::with_titles(&["CPU Usage", "Memory", "CPU Load"]);
        let fetcher = FakeFetcher::default();

        let resolution = SelectorResolver::new(&api, &fetcher)
            .resolve(&SelectionExpression::TitlePattern("CPU*".to_string()))
            .await
            .unwrap();

        let titles: Vec<&str> = resolution.targets.iter().filter_map(Target::title).collect();
        assert_eq!(titles, vec!["CPU Usage", "CPU Load"]);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_pattern_without_matches_is_empty() {
        let api = FakeApi::with_titles(&["Memory"]);
        let fetcher = FakeFetcher::default();

        let resolution = SelectorResolver::new(&api, &fetcher)
            .resolve(&SelectionExpression::TitlePattern("Disk*".to_string()))
            .await
            .unwrap();

        assert!(resolution.is_empty());
        assert!(resolution.failures.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_failure_is_fatal() {
        let api = FakeApi::with_titles(&["A"]).failing_list();
        let fetcher = FakeFetcher::default();

        let result = SelectorResolver::new(&api, &fetcher)
            .resolve(&SelectionExpression::All)
            .await;

        assert!(matches!(
            result,
            Err(ResolutionError::CatalogUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_sources_record_failures_and_continue() {
        let api = FakeApi::default();
        let fetcher = FakeFetcher::default()
            .with("a.json", json!({"title": "A"}))
            .with_error("broken.json")
            .with("c.json", json!({"title": "C"}));
        let sources = vec![
            "a.json".to_string(),
            "broken.json".to_string(),
            "c.json".to_string(),
        ];

        let resolution = SelectorResolver::new(&api, &fetcher)
            .resolve(&SelectionExpression::LocalSources(sources))
            .await
            .unwrap();

        let titles: Vec<&str> = resolution.targets.iter().filter_map(Target::title).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(resolution.failures.len(), 1);
        assert_eq!(resolution.failures[0].reference, "broken.json");
        assert_eq!(api.list_calls(), 0);
    }

    #[test]
    fn test_target_display_prefers_title() {
        let target = Target::Dashboard {
            id: "abc".to_string(),
            title: Some("CPU".to_string()),
        };
        assert_eq!(target.to_string(), "CPU (abc)");
        assert_eq!(Target::dashboard("abc").to_string(), "abc");
    }

    #[test]
    fn test_source_target_serialization_omits_definition() {
        let target = Target::source("a.json", json!({"title": "A", "widgets": []}));
        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(value, json!({"type": "source", "reference": "a.json", "title": "A"}));
    }

    proptest! {
        #[test]
        fn prop_explicit_ids_preserved(ids in proptest::collection::vec("[a-z0-9-]{1,12}", 0..20)) {
            let api = FakeApi::default();
            let fetcher = FakeFetcher::default();
            let resolution =
                resolve_blocking(&api, &fetcher, SelectionExpression::ExplicitIds(ids.clone())).unwrap();
            let keys: Vec<String> = resolution.targets.iter().map(|t| t.key().to_string()).collect();
            prop_assert_eq!(keys, ids);
            prop_assert_eq!(api.list_calls(), 0);
        }

        #[test]
        fn prop_all_returns_whole_catalog(titles in proptest::collection::vec("[A-Za-z ]{0,10}", 0..15)) {
            let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
            let api = FakeApi::with_titles(&refs);
            let fetcher = FakeFetcher::default();
            let resolution = resolve_blocking(&api, &fetcher, SelectionExpression::All).unwrap();
            prop_assert_eq!(resolution.targets.len(), titles.len());
            prop_assert_eq!(api.list_calls(), 1);
        }

        #[test]
        fn prop_pattern_result_is_matching_subsequence(
            titles in proptest::collection::vec("[ab]{0,4}", 0..15),
            pattern in "[ab*?]{1,4}",
        ) {
            let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
            let api = FakeApi::with_titles(&refs);
            let fetcher = FakeFetcher::default();
            let compiled = TitlePattern::new(&pattern).unwrap();
            let resolution =
                resolve_blocking(&api, &fetcher, SelectionExpression::TitlePattern(pattern)).unwrap();

            let expected: Vec<String> = api
                .dashboards()
                .into_iter()
                .filter(|d| compiled.matches(&d.title))
                .map(|d| d.id)
                .collect();
            let got: Vec<String> = resolution.targets.iter().map(|t| t.key().to_string()).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
