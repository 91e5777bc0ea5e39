//! In-memory stand-in for the Planning Center API.
//!
//! Serves canned JSON documents by path and records every request, so the
//! lookups can be exercised without network access. Only compiled for tests
//! and with the `test-support` feature.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::api::PlanningCenterApi;
use crate::error::{Error, Result};

/// Canned-response API keyed by request path (or absolute URL for `get_url`)
#[derive(Debug, Default)]
pub struct StaticApi {
    routes: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl StaticApi {
    /// An API with no routes; every request returns 404
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path`
    #[must_use]
    pub fn route(mut self, path: impl Into<String>, body: Value) -> Self {
        self.routes.insert(path.into(), body);
        self
    }

    /// Every path or URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn serve(&self, key: &str) -> Result<Value> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(key.to_string());
        }
        self.routes
            .get(key)
            .cloned()
            .ok_or_else(|| Error::pco_status(format!("Request to {key} returned 404 Not Found"), 404))
    }
}

#[async_trait]
impl PlanningCenterApi for StaticApi {
    async fn get(&self, path: &str, _query: &[(&str, &str)]) -> Result<Value> {
        self.serve(path)
    }

    async fn get_url(&self, url: &str) -> Result<Value> {
        self.serve(url)
    }
}
