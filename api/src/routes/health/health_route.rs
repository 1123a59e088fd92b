//! GET /health — liveness snapshot of the distinct model profiles.

use std::sync::Arc;

use axum::{Json, extract::State};
use llm_service::HealthStatus;

use crate::core::app_state::AppState;

/// Handler: GET /health
///
/// Always returns 200; per-profile problems are reported in the body with
/// `ok: false`.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Vec<HealthStatus>> {
    Json(state.llm_profiles.health_all().await)
}
