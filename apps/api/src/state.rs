use std::sync::Arc;

use crate::assistant::CvAssistant;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The one assistant instance, built in `main` and shared by every request.
    pub assistant: Arc<CvAssistant>,
}
