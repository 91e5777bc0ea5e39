use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

/// Read access to the Planning Center Services API
///
/// Every lookup in this crate goes through this trait so that the traversal
/// and join logic can run against canned responses.
#[async_trait]
pub trait PlanningCenterApi: Send + Sync {
    /// GET a path relative to the API root
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value>;

    /// GET an absolute URL, as handed out in `links.next`
    async fn get_url(&self, url: &str) -> Result<Value>;
}

/// Client for accessing Planning Center Online API
///
/// Requests are issued one at a time; a failure is returned immediately
/// and never retried.
#[derive(Clone)]
pub struct PlanningCenterClient {
    app_id: String,
    secret: String,
    base_url: String,
    client: Client,
}

impl PlanningCenterClient {
    /// Create a new Planning Center client from config
    pub fn new(config: &Config) -> Self {
        Self {
            app_id: config.app_id.clone(),
            secret: config.secret.clone(),
            base_url: config.base_url.clone(),
            client: Client::new(),
        }
    }

    /// Check if credentials are configured
    fn is_configured(&self) -> bool {
        !self.app_id.is_empty() && !self.secret.is_empty()
    }

    /// Make an authenticated GET request to an absolute URL
    async fn request(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        if !self.is_configured() {
            return Err(Error::config(
                "Planning Center client not configured",
                "Set PCO_APP_ID and PCO_SECRET environment variables",
            ));
        }

        tracing::debug!(url, ?query, "GET");
        let resp = self.client
            .get(url)
            .basic_auth(&self.app_id, Some(&self.secret))
            .header("Content-Type", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::pco_status(
                format!("Request to {url} returned {status}"),
                status.as_u16(),
            ));
        }

        resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON: {e}"), url.to_string()))
    }
}

#[async_trait]
impl PlanningCenterApi for PlanningCenterClient {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        self.request(&url, query).await
    }

    async fn get_url(&self, url: &str) -> Result<Value> {
        self.request(url, &[]).await
    }
}
