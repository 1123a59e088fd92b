//! POST /action — follow-up actions over a previously discussed topic.

use std::sync::Arc;

use agents::{ActionOutcome, AgentError};
use axum::{Json, extract::State};
use tracing::error;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::action::action_request::ActionRequest,
};

/// Handler: POST /action
///
/// Returns `{"questions": [...]}` for `suggest_questions` and
/// `{"answer": "..."}` for the explain actions. An unrecognized action name is
/// rejected with 400 before any model call.
pub async fn perform_action(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ActionRequest>,
) -> AppResult<Json<ActionOutcome>> {
    let outcome = state
        .orchestrator
        .follow_up(&body.action, &body.topic)
        .await
        .map_err(|e| match e {
            AgentError::UnknownAction(_) => AppError::BadRequest(e.to_string()),
            other => {
                error!(error = %other, "an error occurred in /action");
                AppError::Internal {
                    code: "ACTION_FAILED",
                    message: "Failed to perform the requested action.".into(),
                }
            }
        })?;

    Ok(Json(outcome))
}
