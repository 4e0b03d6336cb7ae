//! HTTP request handlers

use super::state::AppState;
use crate::suggest::SuggestionRequest;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

/// Body sent for requests that cannot be decoded
pub const INVALID_REQUEST: &str = "Invalid request";

/// Query parameters for the suggest endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestParams {
    pub context_node_identifier: String,
    #[serde(default)]
    pub dimension_combination: String,
    /// Missing terms fail validation like any other non-string term
    pub term: Option<String>,
}

impl From<SuggestParams> for SuggestionRequest {
    fn from(params: SuggestParams) -> Self {
        Self {
            context_node_identifier: params.context_node_identifier,
            dimension_combination: params.dimension_combination,
            term: params
                .term
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Suggest handler for query-string requests
pub async fn suggest(
    State(state): State<AppState>,
    params: Result<Query<SuggestParams>, QueryRejection>,
) -> Response {
    match params {
        Ok(Query(params)) => respond(&state, params.into()).await,
        Err(rejection) => {
            debug!("Rejected suggest query: {}", rejection.body_text());
            (rejection.status(), INVALID_REQUEST).into_response()
        }
    }
}

/// Suggest handler for JSON bodies
pub async fn suggest_json(
    State(state): State<AppState>,
    request: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Response {
    match request {
        Ok(Json(request)) => respond(&state, request).await,
        Err(rejection) => {
            debug!("Rejected suggest body: {}", rejection.body_text());
            (rejection.status(), INVALID_REQUEST).into_response()
        }
    }
}

async fn respond(state: &AppState, request: SuggestionRequest) -> Response {
    match state.controller.index(&request).await {
        Ok(outcome) => Json(outcome).into_response(),
        // Already logged by the controller; no details leave the service
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response(),
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.controller.metrics().snapshot())
}
