//! Web server module
//!
//! Exposes the suggestion action over HTTP as JSON.

mod handlers;
mod routes;
mod state;

pub use handlers::SuggestParams;
pub use routes::create_router;
pub use state::AppState;
