//! Search backend client

use crate::config::ElasticsearchSettings;
use crate::error::{Result, SuggestError};
use crate::network::{HttpClient, HttpMethod};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Executes raw requests against the search index
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Send `body` to `path` below the index and return the parsed JSON body.
    ///
    /// Transport failures, non-2xx answers and unparsable bodies are errors.
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &HashMap<String, String>,
        body: String,
    ) -> Result<serde_json::Value>;

    /// Upper bound for a single request
    fn timeout(&self) -> Duration {
        Duration::from_secs(crate::DEFAULT_TIMEOUT)
    }
}

/// Client for one Elasticsearch index
#[derive(Clone)]
pub struct ElasticSearchClient {
    http: HttpClient,
    index: String,
}

impl ElasticSearchClient {
    pub fn new(http: HttpClient, index: impl Into<String>) -> Self {
        Self {
            http,
            index: index.into(),
        }
    }

    pub fn with_settings(settings: &ElasticsearchSettings) -> Result<Self> {
        Ok(Self::new(HttpClient::with_settings(settings)?, settings.index.clone()))
    }

    /// Index all requests are sent to
    pub fn index(&self) -> &str {
        &self.index
    }

    fn index_path(&self, path: &str) -> String {
        format!("{}/{}", self.index, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl SearchClient for ElasticSearchClient {
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &HashMap<String, String>,
        body: String,
    ) -> Result<serde_json::Value> {
        let path = self.index_path(path);
        debug!("{} {} ({} bytes)", method.as_str(), path, body.len());

        let response = self.http.execute(method, &path, headers, Some(body)).await?;

        if !response.is_success() {
            return Err(SuggestError::execution(format!(
                "{} {} answered with status {}",
                method.as_str(),
                response.url,
                response.status
            )));
        }

        response.json()
    }

    fn timeout(&self) -> Duration {
        self.http.timeout()
    }
}
