//! Error types for the suggestion service

use thiserror::Error;

/// Result type alias for suggestion operations
pub type Result<T> = std::result::Result<T, SuggestError>;

/// Message returned when the `term` argument is not a string
pub const TERM_NOT_STRING: &str = "term has to be a string";

/// Message returned when the search backend call fails
pub const QUERY_EXECUTION_FAILED: &str = "Could not execute query";

/// Errors raised while answering a suggestion request
#[derive(Error, Debug)]
pub enum SuggestError {
    /// Caller input failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The query template could not be built
    #[error("Query building error: {message}")]
    QueryBuilding { message: String },

    /// The search backend call or response parsing failed
    #[error("Query execution error: {message}")]
    Execution { message: String },

    /// The search backend is not configured
    #[error("The suggest controller needs an Elasticsearch client, but no backend is configured")]
    MissingBackend,

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl SuggestError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a query building error
    pub fn query_building<S: Into<String>>(message: S) -> Self {
        Self::QueryBuilding {
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution<S: Into<String>>(message: S) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the query building category
    pub fn is_query_building(&self) -> bool {
        matches!(self, Self::QueryBuilding { .. })
    }
}
