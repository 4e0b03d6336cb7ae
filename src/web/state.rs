//! Application state shared across handlers

use crate::suggest::SuggestController;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Suggestion action
    pub controller: Arc<SuggestController>,
}

impl AppState {
    /// Create new application state
    pub fn new(controller: SuggestController) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}
