//! Dashboard methods on [`SignozClient`].

use async_trait::async_trait;
use serde_json::Value;

use crate::batch::DashboardApi;
use crate::client::SignozClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::Dashboard;

impl SignozClient {
    /// List all dashboards visible to the session.
    pub async fn list_dashboards(&self) -> Result<Vec<Dashboard>> {
        let token = self.bearer_token()?;
        endpoints::list_dashboards(&self.http, &self.base_url, token, self.max_retries).await
    }

    /// Create a dashboard from its JSON definition.
    pub async fn create_dashboard(&self, definition: &Value) -> Result<Dashboard> {
        let token = self.bearer_token()?;
        endpoints::create_dashboard(
            &self.http,
            &self.base_url,
            token,
            definition,
            self.max_retries,
        )
        .await
    }

    /// Delete the dashboard with the given id.
    pub async fn delete_dashboard(&self, id: &str) -> Result<()> {
        let token = self.bearer_token()?;
        endpoints::delete_dashboard(&self.http, &self.base_url, token, id, self.max_retries).await
    }
}

#[async_trait]
impl DashboardApi for SignozClient {
    async fn list(&self) -> Result<Vec<Dashboard>> {
        self.list_dashboards().await
    }

    async fn create(&self, definition: &Value) -> Result<Dashboard> {
        self.create_dashboard(definition).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_dashboard(id).await
    }
}
