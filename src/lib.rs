//! node-suggest: autocomplete and suggestions for content-repository nodes
//!
//! Builds an Elasticsearch suggestion query per context node and dimension
//! combination, caches it as a template with a term placeholder, and turns
//! the search response into a flat list of display strings for a
//! front-end widget.

pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod metrics;
pub mod network;
pub mod query;
pub mod search;
pub mod suggest;
pub mod web;

pub use config::Settings;
pub use error::{Result, SuggestError};
pub use suggest::{SuggestController, SuggestOutcome, SuggestionRequest, SuggestionResult};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for search backend requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;
