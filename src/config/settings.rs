//! Settings structures for the suggestion service

use crate::error::{Result, SuggestError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    /// Search backend; absent when the deployment runs without Elasticsearch
    pub elasticsearch: Option<ElasticsearchSettings>,
    pub cache: CacheSettings,
    pub content: ContentSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (SUGGEST_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SUGGEST_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("SUGGEST_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SUGGEST_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("SUGGEST_ELASTICSEARCH_URL") {
            self.elasticsearch.get_or_insert_with(Default::default).url = val;
        }
        if let Ok(val) = std::env::var("SUGGEST_ELASTICSEARCH_INDEX") {
            self.elasticsearch.get_or_insert_with(Default::default).index = val;
        }
    }

    /// Log filter directive derived from the debug flag
    pub fn log_filter(&self) -> &'static str {
        if self.general.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8081,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Elasticsearch connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchSettings {
    /// Base URL of the cluster
    pub url: String,
    /// Index holding the content-repository documents
    pub index: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Basic auth user
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
    /// Verify TLS certificates
    pub verify_ssl: bool,
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// Extra headers sent with every request
    pub extra_headers: HashMap<String, String>,
}

impl Default for ElasticsearchSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9200".to_string(),
            index: "neoscr".to_string(),
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            username: None,
            password: None,
            verify_ssl: true,
            pool_maxsize: 20,
            extra_headers: HashMap::new(),
        }
    }
}

impl ElasticsearchSettings {
    /// Parse the configured base URL
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| SuggestError::config(format!("invalid Elasticsearch url '{}': {}", self.url, e)))?;
        if url.cannot_be_a_base() {
            return Err(SuggestError::config(format!(
                "Elasticsearch url '{}' cannot be used as a base",
                self.url
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

/// Query template cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Time to live in seconds; templates never expire when unset
    pub ttl: Option<u64>,
    /// Maximum number of cached templates
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: None,
            max_capacity: 10_000,
        }
    }
}

/// Content repository settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// YAML file listing the content nodes
    pub nodes_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_backend() {
        let settings = Settings::default();
        assert!(settings.elasticsearch.is_none());
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.cache.ttl, None);
        assert_eq!(settings.log_filter(), "info");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
general:
  debug: true
elasticsearch:
  url: "http://search:9200"
  index: "site"
cache:
  ttl: 600
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        let es = settings.elasticsearch.as_ref().unwrap();
        assert_eq!(es.url, "http://search:9200");
        assert_eq!(es.index, "site");
        assert!(es.verify_ssl);
        assert_eq!(settings.cache.ttl, Some(600));
        assert_eq!(settings.cache.max_capacity, 10_000);
        assert_eq!(settings.log_filter(), "debug");
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let es = ElasticsearchSettings {
            url: "http://search:9200/prefix".to_string(),
            ..Default::default()
        };
        assert_eq!(es.base_url().unwrap().as_str(), "http://search:9200/prefix/");
    }

    #[test]
    fn test_invalid_base_url() {
        let es = ElasticsearchSettings {
            url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(es.base_url(), Err(SuggestError::Config { .. })));
    }

    #[test]
    fn test_example_settings_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/settings.example.yml");
        let settings = Settings::from_file(path).unwrap();
        assert_eq!(settings.elasticsearch.unwrap().index, "neoscr");
        assert!(settings.content.nodes_path.is_some());
    }
}
