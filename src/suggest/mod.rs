//! Suggestion action
//!
//! Flow for one request: validate and normalize the term, fetch or build the
//! query template for the context node, splice in the term, run the search
//! and flatten completions (or, failing those, suggestions) into display
//! strings.

mod controller;
mod models;
mod template;

pub use controller::SuggestController;
pub use models::{SuggestOutcome, SuggestionRequest, SuggestionResult};
pub use template::{
    QueryTemplate, QueryTemplateBuilder, TemplateSource, COMPLETION_FIELD, SUGGESTION_FIELD,
    SUGGESTION_SIZE, TERM_PLACEHOLDER,
};
