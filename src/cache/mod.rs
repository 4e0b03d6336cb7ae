//! Query template cache
//!
//! The cache is owned by the caller and injected into the template builder.
//! Eviction and expiry are the backing store's business.

use crate::config::CacheSettings;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;

/// Key/value store for serialized query templates
#[async_trait]
pub trait TemplateCache: Send + Sync {
    /// Whether a template is stored under `key`
    async fn has(&self, key: &str) -> bool;

    /// Fetch the template stored under `key`
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a template under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String);
}

/// In-process template cache backed by moka
pub struct MokaTemplateCache {
    cache: Cache<String, String>,
}

impl MokaTemplateCache {
    /// Create a cache holding at most `max_capacity` templates
    pub fn new(ttl: Option<Duration>, max_capacity: u64) -> Self {
        let mut builder = Cache::builder().max_capacity(max_capacity);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }

    /// Create a cache from settings
    pub fn with_settings(settings: &CacheSettings) -> Self {
        Self::new(settings.ttl.map(Duration::from_secs), settings.max_capacity)
    }

}

impl Default for MokaTemplateCache {
    fn default() -> Self {
        Self::with_settings(&CacheSettings::default())
    }
}

#[async_trait]
impl TemplateCache for MokaTemplateCache {
    async fn has(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).await
    }

    async fn set(&self, key: &str, value: String) {
        self.cache.insert(key.to_string(), value).await;
    }
}

/// Hex md5 digest, the hash used for cache keys and dimension hashes
pub fn md5_hex(data: impl AsRef<[u8]>) -> String {
    format!("{:x}", md5::compute(data))
}

/// Cache key for a context node and a serialized dimension combination.
///
/// The same node and the same dimension combination always map to the same
/// key, whatever the search term is.
pub fn template_cache_key(context_node_identifier: &str, dimension_combination: &str) -> String {
    format!(
        "{}-{}",
        context_node_identifier,
        md5_hex(dimension_combination)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_template_cache() {
        let cache = MokaTemplateCache::new(None, 100);
        assert!(!cache.has("node-1").await);
        assert_eq!(cache.get("node-1").await, None);

        cache.set("node-1", "{\"size\":1}".to_string()).await;
        assert!(cache.has("node-1").await);
        assert_eq!(cache.get("node-1").await.as_deref(), Some("{\"size\":1}"));

        cache.set("node-1", "{}".to_string()).await;
        assert_eq!(cache.get("node-1").await.as_deref(), Some("{}"));
        assert!(!cache.has("node-2").await);
    }

    #[test]
    fn test_md5_hex() {
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_cache_key_depends_on_dimensions() {
        let en = template_cache_key("abc", r#"{"language":["en"]}"#);
        let de = template_cache_key("abc", r#"{"language":["de"]}"#);
        assert_ne!(en, de);
        assert!(en.starts_with("abc-"));
        assert_eq!(en.len(), "abc-".len() + 32);
        assert_eq!(en, template_cache_key("abc", r#"{"language":["en"]}"#));
    }
}
