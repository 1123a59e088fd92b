use std::sync::Arc;

use agents::{LlmChainBackend, Orchestrator, SearchContext};
use llm_service::LlmServiceProfiles;

use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Orchestrator driving the model calls behind every endpoint.
    pub orchestrator: Orchestrator,
    /// Shared model profiles, also probed by `/health`.
    pub llm_profiles: Arc<LlmServiceProfiles>,
}

impl AppState {
    /// Load shared state from environment variables, reading them once at
    /// startup. Requires `GOOGLE_API_KEY`.
    pub fn from_env() -> Result<Self, AppError> {
        let llm_profiles = Arc::new(LlmServiceProfiles::from_env()?);

        let backend = Arc::new(LlmChainBackend::new(llm_profiles.clone()));
        let context = Arc::new(SearchContext::new());

        Ok(Self {
            orchestrator: Orchestrator::new(backend, context),
            llm_profiles,
        })
    }
}
