//! HTTP client for talking to the Elasticsearch cluster

use crate::config::ElasticsearchSettings;
use crate::error::{Result, SuggestError};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
        }
    }
}

/// Raw HTTP response
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl HttpResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client bound to a cluster base URL
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    default_timeout: Duration,
    extra_headers: HashMap<String, String>,
    credentials: Option<(String, Option<String>)>,
}

impl HttpClient {
    /// Create a new HTTP client from backend settings
    pub fn with_settings(settings: &ElasticsearchSettings) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout)
            .ok()
            .filter(|timeout| !timeout.is_zero())
            .ok_or_else(|| {
                SuggestError::config(format!(
                    "request_timeout must be a positive number of seconds, got {}",
                    settings.request_timeout
                ))
            })?;
        let mut builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: settings.base_url()?,
            default_timeout: timeout,
            extra_headers: settings.extra_headers.clone(),
            credentials: settings
                .username
                .clone()
                .map(|user| (user, settings.password.clone())),
        })
    }

    /// Default request timeout
    pub fn timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Execute a request against `path`, relative to the base URL
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &HashMap<String, String>,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| SuggestError::execution(format!("invalid request path '{}': {}", path, e)))?;

        let mut req_builder = match method {
            HttpMethod::Post => self.client.post(url),
        };

        req_builder = req_builder
            .timeout(self.default_timeout)
            .header("Accept", "application/json");

        if let Some((ref user, ref password)) = self.credentials {
            req_builder = req_builder.basic_auth(user, password.as_ref());
        }

        // Configured headers first, per-request headers override them
        for (key, value) in self.extra_headers.iter().chain(headers.iter()) {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let text = response.text().await?;

        Ok(HttpResponse {
            status,
            text,
            url,
        })
    }
}
