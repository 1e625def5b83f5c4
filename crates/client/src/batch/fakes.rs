//! In-memory collaborators for batch engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::batch::{ConfirmPrompt, DashboardApi, OperationOutcome, ProgressSink, SourceFetcher};
use crate::error::{ClientError, Result};
use crate::models::Dashboard;
use crate::sources::FetchError;

/// Dashboard API backed by a vector. Ids are `id-<index>`.
#[derive(Default)]
pub struct FakeApi {
    dashboards: Mutex<Vec<Dashboard>>,
    fail_list: bool,
    failing: HashSet<String>,
    unreachable: HashSet<String>,
    list_calls: AtomicUsize,
    calls: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl FakeApi {
    pub fn with_titles(titles: &[&str]) -> Self {
        let dashboards = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Dashboard {
                id: format!("id-{i}"),
                title: title.to_string(),
                definition: serde_json::json!({ "title": title }),
                created_by: None,
                created_at: None,
                updated_at: None,
            })
            .collect::<Vec<_>>();
        let next_id = AtomicUsize::new(dashboards.len());
        Self {
            dashboards: Mutex::new(dashboards),
            next_id,
            ..Self::default()
        }
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Calls keyed by `key` (id or title) fail with HTTP 400.
    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    /// Calls keyed by `key` fail as if the server were unreachable.
    pub fn unreachable_on(mut self, key: &str) -> Self {
        self.unreachable.insert(key.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Every mutating call, in order, as `create:<title>` or `delete:<id>`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn dashboards(&self) -> Vec<Dashboard> {
        self.dashboards.lock().unwrap().clone()
    }

    fn check(&self, key: &str) -> Result<()> {
        if self.unreachable.contains(key) {
            return Err(ClientError::ConnectionRefused("http://fake".to_string()));
        }
        if self.failing.contains(key) {
            return Err(ClientError::ApiError {
                status: 400,
                url: "http://fake/api/v1/dashboards".to_string(),
                message: format!("rejected {key}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn list(&self) -> Result<Vec<Dashboard>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(ClientError::ApiError {
                status: 500,
                url: "http://fake/api/v1/dashboards".to_string(),
                message: "catalog down".to_string(),
            });
        }
        Ok(self.dashboards())
    }

    async fn create(&self, definition: &Value) -> Result<Dashboard> {
        let title = Dashboard::title_of(definition).unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(format!("create:{title}"));
        self.check(&title)?;
        let id = format!("id-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let dashboard = Dashboard {
            id,
            title,
            definition: definition.clone(),
            created_by: None,
            created_at: None,
            updated_at: None,
        };
        self.dashboards.lock().unwrap().push(dashboard.clone());
        Ok(dashboard)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("delete:{id}"));
        self.check(id)?;
        let mut dashboards = self.dashboards.lock().unwrap();
        let before = dashboards.len();
        dashboards.retain(|d| d.id != id);
        if dashboards.len() == before {
            return Err(ClientError::ApiError {
                status: 404,
                url: format!("http://fake/api/v1/dashboards/{id}"),
                message: "not found".to_string(),
            });
        }
        Ok(())
    }
}

/// Source fetcher backed by a map; unknown references are not found.
#[derive(Default)]
pub struct FakeFetcher {
    sources: HashMap<String, Value>,
    broken: HashSet<String>,
}

impl FakeFetcher {
    pub fn with(mut self, reference: &str, definition: Value) -> Self {
        self.sources.insert(reference.to_string(), definition);
        self
    }

    /// `reference` exists but is not valid JSON.
    pub fn with_error(mut self, reference: &str) -> Self {
        self.broken.insert(reference.to_string());
        self
    }
}

#[async_trait]
impl SourceFetcher for FakeFetcher {
    async fn fetch(&self, reference: &str) -> std::result::Result<Value, FetchError> {
        if self.broken.contains(reference) {
            return Err(FetchError::InvalidJson {
                reference: reference.to_string(),
                message: "expected value at line 1 column 1".to_string(),
            });
        }
        self.sources
            .get(reference)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(reference.to_string()))
    }
}

/// Prompt with a fixed answer that counts how often it was asked.
pub struct ScriptedPrompt {
    answer: bool,
    asked: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn ask(&self, _question: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

/// Progress sink that records each tick.
#[derive(Default)]
pub struct RecordingProgress {
    pub ticks: Mutex<Vec<bool>>,
    pub starts: AtomicUsize,
}

impl ProgressSink for RecordingProgress {
    fn on_start(&self, _target: &crate::batch::Target, _position: usize, _total: usize) {
        self.starts.fetch_add(1, Ordering::SeqCst);
    }

    fn on_tick(&self, outcome: &OperationOutcome) {
        self.ticks.lock().unwrap().push(outcome.is_success());
    }
}

/// Progress sink that asks the batch to stop once `limit` targets have ticked.
pub struct StopAfter {
    limit: usize,
    ticks: AtomicUsize,
}

impl StopAfter {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ticks: AtomicUsize::new(0),
        }
    }
}

impl ProgressSink for StopAfter {
    fn on_tick(&self, _outcome: &OperationOutcome) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    fn should_stop(&self) -> bool {
        self.ticks.load(Ordering::SeqCst) >= self.limit
    }
}
