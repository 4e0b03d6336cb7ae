//! Query construction
//!
//! Term normalization for user input and the request document builder used
//! to create suggestion query templates.

mod builder;
mod term;

pub use builder::QueryBuilder;
pub use term::normalize_term;
