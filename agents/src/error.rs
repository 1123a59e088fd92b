//! Typed error for the agents crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// The caller asked for a follow-up action this service does not know.
    /// Signaled before any external call is made.
    #[error("invalid action type: {0}")]
    UnknownAction(String),

    /// Errors from the underlying model service.
    #[error(transparent)]
    Llm(#[from] llm_service::LlmServiceError),

    /// The model produced output the expected shape could not be read from.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),
}
