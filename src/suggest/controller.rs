//! The suggestion action

use super::models::{SuggestOutcome, SuggestionRequest, SuggestionResult};
use super::template::{QueryTemplateBuilder, TemplateSource};
use crate::error::{Result, SuggestError};
use crate::metrics::SuggestMetrics;
use crate::network::HttpMethod;
use crate::query::normalize_term;
use crate::search::{extract_completions, extract_suggestions, SearchClient, SearchResponse};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{error, warn};

/// Answers suggestion requests for a content node
#[derive(Clone)]
pub struct SuggestController {
    client: Arc<dyn SearchClient>,
    templates: QueryTemplateBuilder,
    metrics: Arc<SuggestMetrics>,
}

impl SuggestController {
    /// Create the controller; fails when no search backend is available
    pub fn new(
        client: Option<Arc<dyn SearchClient>>,
        templates: QueryTemplateBuilder,
        metrics: Arc<SuggestMetrics>,
    ) -> Result<Self> {
        let client = client.ok_or(SuggestError::MissingBackend)?;

        Ok(Self {
            client,
            templates,
            metrics,
        })
    }

    pub fn metrics(&self) -> &SuggestMetrics {
        &self.metrics
    }

    /// Handle one request.
    ///
    /// Validation and backend failures are reported inside the outcome.
    /// A query template that cannot be built is returned as `Err`.
    pub async fn index(&self, request: &SuggestionRequest) -> Result<SuggestOutcome> {
        self.metrics.inc_request();

        let term = match request.term() {
            Some(term) => term,
            None => {
                self.metrics.inc_validation_failure();
                return Ok(SuggestOutcome::Failed(SuggestionResult::term_not_string()));
            }
        };

        let payload = self
            .request_for_term(
                &request.context_node_identifier,
                &request.dimension_combination,
                term,
            )
            .await
            .map_err(|e| {
                self.metrics.record_query_building_error();
                error!(
                    "Could not build suggestion query for node {}: {}",
                    request.context_node_identifier, e
                );
                e
            })?;

        let result = match self.execute(payload).await {
            Ok(response) => SuggestionResult {
                completions: extract_completions(&response),
                suggestions: extract_suggestions(&response),
                errors: None,
            },
            Err(e) => {
                self.metrics.record_execution_error();
                warn!(
                    "Suggestion query for node {} failed: {}",
                    request.context_node_identifier, e
                );
                SuggestionResult::query_failed()
            }
        };

        if result.has_errors() {
            return Ok(SuggestOutcome::Failed(result));
        }

        Ok(SuggestOutcome::Options(result.options()))
    }

    /// Serialized search request for `term`
    pub async fn request_for_term(
        &self,
        context_node_identifier: &str,
        dimension_combination: &str,
        term: &str,
    ) -> Result<String> {
        let suggest_term = normalize_term(term);
        let (template, source) = self
            .templates
            .build_or_fetch(context_node_identifier, dimension_combination)
            .await?;

        match source {
            TemplateSource::Cache => self.metrics.record_cache_hit(),
            TemplateSource::Built => self.metrics.record_cache_miss(),
        }

        Ok(template.materialize(&suggest_term))
    }

    async fn execute(&self, payload: String) -> Result<SearchResponse> {
        let start = Instant::now();
        let limit = self.client.timeout();

        let body = timeout(
            limit,
            self.client
                .execute(HttpMethod::Post, "/_search", &HashMap::new(), payload),
        )
        .await
        .map_err(|_| SuggestError::execution(format!("search request timed out after {:?}", limit)))??;

        self.metrics
            .record_response_time(start.elapsed().as_millis() as u64);

        SearchResponse::from_value(body)
    }
}
