//! Cached query templates
//!
//! Building the suggestion query requires resolving the context node, so the
//! serialized request is built once per node and dimension combination with a
//! placeholder where the term goes, then cached. Each request only splices its
//! normalized term into the cached template.

use crate::cache::{template_cache_key, TemplateCache};
use crate::content::{ContentContextResolver, Dimensions, LIVE_WORKSPACE};
use crate::error::{Result, SuggestError};
use crate::query::QueryBuilder;
use crate::search::{AUTOCOMPLETE_AGGREGATION, SUGGESTER_NAME};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Stands in for the search term inside a cached template
pub const TERM_PLACEHOLDER: &str = "---term-soh2gufuNi---";

/// Index field holding prefix-searchable completion terms
pub const COMPLETION_FIELD: &str = "__completion";

/// Index field backing the completion suggester
pub const SUGGESTION_FIELD: &str = "__suggestions";

/// Maximum number of suggester options
pub const SUGGESTION_SIZE: usize = 10;

/// A serialized search request with the term placeholder still in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    source: String,
}

impl QueryTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Substitute every placeholder occurrence with `term`.
    ///
    /// `term` must already be normalized; it is inserted without escaping.
    pub fn materialize(&self, term: &str) -> String {
        self.source.replace(TERM_PLACEHOLDER, term)
    }
}

/// Where a template came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    Cache,
    Built,
}

/// Builds suggestion query templates and keeps them in the template cache
#[derive(Clone)]
pub struct QueryTemplateBuilder {
    cache: Arc<dyn TemplateCache>,
    content: Arc<dyn ContentContextResolver>,
}

impl QueryTemplateBuilder {
    pub fn new(cache: Arc<dyn TemplateCache>, content: Arc<dyn ContentContextResolver>) -> Self {
        Self { cache, content }
    }

    /// Return the cached template for this node and dimension combination,
    /// building and caching it on a miss.
    ///
    /// Cached templates are not checked against the current node state.
    pub async fn build_or_fetch(
        &self,
        context_node_identifier: &str,
        dimension_combination: &str,
    ) -> Result<(QueryTemplate, TemplateSource)> {
        let cache_key = template_cache_key(context_node_identifier, dimension_combination);

        if self.cache.has(&cache_key).await {
            // The entry may have been evicted since `has`
            if let Some(source) = self.cache.get(&cache_key).await {
                debug!("Query template cache hit for {}", cache_key);
                return Ok((QueryTemplate::new(source), TemplateSource::Cache));
            }
        }

        debug!("Query template cache miss for {}", cache_key);
        let template = self
            .build(context_node_identifier, dimension_combination)
            .map_err(|e| match e {
                e @ SuggestError::QueryBuilding { .. } => e,
                other => SuggestError::query_building(other.to_string()),
            })?;

        self.cache
            .set(&cache_key, template.as_str().to_string())
            .await;

        Ok((template, TemplateSource::Built))
    }

    fn build(
        &self,
        context_node_identifier: &str,
        dimension_combination: &str,
    ) -> Result<QueryTemplate> {
        let dimensions = Dimensions::from_combination(dimension_combination)?;
        let context = self.content.resolve_context(LIVE_WORKSPACE, &dimensions)?;
        let node = context
            .node_by_identifier(context_node_identifier)
            .ok_or_else(|| {
                SuggestError::query_building(format!(
                    "context node '{}' not found in workspace '{}'",
                    context_node_identifier,
                    context.workspace_name()
                ))
            })?;

        let query = QueryBuilder::for_node(&node, context.workspace_name())
            .query_filter("prefix", json!({ COMPLETION_FIELD: TERM_PLACEHOLDER }))
            .limit(1)
            .aggregation(
                AUTOCOMPLETE_AGGREGATION,
                json!({
                    "terms": {
                        "field": COMPLETION_FIELD,
                        "order": { "_count": "desc" },
                        "include": { "pattern": format!("{}.*", TERM_PLACEHOLDER) }
                    }
                }),
            )
            .suggestions(
                SUGGESTER_NAME,
                json!({
                    "text": TERM_PLACEHOLDER,
                    "completion": {
                        "field": SUGGESTION_FIELD,
                        "fuzzy": true,
                        "size": SUGGESTION_SIZE,
                        "context": {
                            "parentPath": node.path(),
                            "workspace": LIVE_WORKSPACE,
                            "dimensionCombinationHash": node.context_dimensions().combination_hash()
                        }
                    }
                }),
            );

        Ok(QueryTemplate::new(query.to_json()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MokaTemplateCache;
    use crate::content::{InMemoryContentRepository, NodeRecord};
    use crate::query::normalize_term;
    use serde_json::Value;

    const ENGLISH: &str = r#"{"language":["en"]}"#;

    fn english() -> Dimensions {
        Dimensions::from_combination(ENGLISH).unwrap()
    }

    fn builder_with_cache(cache: Arc<MokaTemplateCache>) -> QueryTemplateBuilder {
        let content = InMemoryContentRepository::new(vec![
            NodeRecord::new("home", "/sites/demo").with_dimensions(english()),
        ]);
        QueryTemplateBuilder::new(cache, Arc::new(content))
    }

    fn builder() -> QueryTemplateBuilder {
        builder_with_cache(Arc::new(MokaTemplateCache::new(None, 100)))
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache() {
        let cache = Arc::new(MokaTemplateCache::new(None, 100));
        let builder = builder_with_cache(cache.clone());

        let (first, source) = builder.build_or_fetch("home", ENGLISH).await.unwrap();
        assert_eq!(source, TemplateSource::Built);

        let (second, source) = builder.build_or_fetch("home", ENGLISH).await.unwrap();
        assert_eq!(source, TemplateSource::Cache);
        assert_eq!(first, second);

        // Stored under the dimension-aware key only
        assert!(cache.has(&template_cache_key("home", ENGLISH)).await);
        assert!(!cache.has("home").await);
    }

    #[tokio::test]
    async fn test_other_dimensions_use_other_key() {
        let cache = Arc::new(MokaTemplateCache::new(None, 100));
        cache
            .set(&template_cache_key("home", ENGLISH), "cached".to_string())
            .await;
        let builder = builder_with_cache(cache);

        let (template, _) = builder.build_or_fetch("home", ENGLISH).await.unwrap();
        assert_eq!(template.as_str(), "cached");

        // Same node, different dimensions: not served from the English entry
        let result = builder
            .build_or_fetch("home", r#"{"language":["de"]}"#)
            .await;
        assert!(result.unwrap_err().is_query_building());
    }

    #[tokio::test]
    async fn test_template_contents() {
        let (template, _) = builder().build_or_fetch("home", ENGLISH).await.unwrap();
        let request: Value = serde_json::from_str(template.as_str()).unwrap();

        assert_eq!(request["size"], 1);
        assert_eq!(
            request.pointer("/query/bool/filter/bool/must/3/prefix/__completion"),
            Some(&Value::from(TERM_PLACEHOLDER))
        );

        let terms = &request["aggs"]["autocomplete"]["terms"];
        assert_eq!(terms["field"], COMPLETION_FIELD);
        assert_eq!(terms["order"]["_count"], "desc");
        assert_eq!(terms["include"]["pattern"], format!("{}.*", TERM_PLACEHOLDER));

        let suggester = &request["suggest"]["suggestions"];
        assert_eq!(suggester["text"], TERM_PLACEHOLDER);
        assert_eq!(suggester["completion"]["field"], SUGGESTION_FIELD);
        assert_eq!(suggester["completion"]["fuzzy"], true);
        assert_eq!(suggester["completion"]["size"], 10);
        assert_eq!(suggester["completion"]["context"]["parentPath"], "/sites/demo");
        assert_eq!(suggester["completion"]["context"]["workspace"], "live");
        assert_eq!(
            suggester["completion"]["context"]["dimensionCombinationHash"],
            english().combination_hash()
        );
    }

    #[tokio::test]
    async fn test_unknown_node_is_query_building_error() {
        let err = builder().build_or_fetch("missing", ENGLISH).await.unwrap_err();
        assert!(err.is_query_building());
    }

    #[tokio::test]
    async fn test_malformed_dimensions_are_not_cached() {
        let cache = Arc::new(MokaTemplateCache::new(None, 100));
        let builder = builder_with_cache(cache.clone());

        let err = builder.build_or_fetch("home", "{oops").await.unwrap_err();
        assert!(err.is_query_building());
        assert!(!cache.has(&template_cache_key("home", "{oops")).await);
    }

    #[tokio::test]
    async fn test_materialize_replaces_every_placeholder() {
        let (template, _) = builder().build_or_fetch("home", ENGLISH).await.unwrap();
        assert!(template.as_str().matches(TERM_PLACEHOLDER).count() >= 3);

        for raw in ["Cat", "hello world", "", "x-y!z"] {
            let payload = template.materialize(&normalize_term(raw));
            assert!(!payload.contains(TERM_PLACEHOLDER));
            let request: Value = serde_json::from_str(&payload).unwrap();
            assert_eq!(request["suggest"]["suggestions"]["text"], normalize_term(raw));
        }
    }

    #[test]
    fn test_materialize_plain_string() {
        let template = QueryTemplate::new(format!("a{0}b{0}", TERM_PLACEHOLDER));
        assert_eq!(template.materialize("cat"), "acatbcat");
    }
}
