//! Search backend access
//!
//! The client that talks to Elasticsearch and the readers for its responses.

mod client;
mod response;

pub use client::{ElasticSearchClient, SearchClient};
pub use response::{
    extract_completions, extract_suggestions, Bucket, SearchResponse, SuggestEntry,
    SuggestionOption, TermsAggregation, AUTOCOMPLETE_AGGREGATION, SUGGESTER_NAME,
};
