//! POST /chat — answers an astronomy query, optionally image-augmented.

use std::sync::Arc;

use agents::StructuredAnswer;
use axum::{Json, extract::State};
use tracing::error;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::chat::chat_request::ChatRequest,
};

/// Handler: POST /chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"query":"Why did Betelgeuse dim in 2020?"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<StructuredAnswer>> {
    let response = state
        .orchestrator
        .chat(&body.query, body.image_base64.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "an error occurred in /chat");
            AppError::Internal {
                code: "CHAT_FAILED",
                message: "An internal server error occurred.".into(),
            }
        })?;

    Ok(Json(response))
}
