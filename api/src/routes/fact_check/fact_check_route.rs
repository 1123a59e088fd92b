//! POST /fact-check — standalone validation of a query/answer pair.

use std::sync::Arc;

use agents::FactCheckReport;
use axum::{Json, extract::State};
use tracing::error;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::fact_check::fact_check_request::FactCheckRequest,
};

/// Handler: POST /fact-check
///
/// Unlike the chat path, failures here are not masked; they surface as a
/// generic 500.
pub async fn fact_check(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FactCheckRequest>,
) -> AppResult<Json<FactCheckReport>> {
    let report = state
        .orchestrator
        .fact_check(&body.original_query, &body.answer_to_check)
        .await
        .map_err(|e| {
            error!(error = %e, "an error occurred in /fact-check");
            AppError::Internal {
                code: "FACT_CHECK_FAILED",
                message: "Failed to perform fact-checking.".into(),
            }
        })?;

    Ok(Json(report))
}
