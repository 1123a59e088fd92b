//! HTTP transport for the space chat guide.
//!
//! Endpoints: `POST /chat`, `POST /action`, `POST /fact-check`, `GET /health`.

mod core;
pub mod error_handler;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;

use crate::core::app_state::AppState;
use crate::error_handler::AppError;
use crate::routes::{
    action::action_route::perform_action, chat::chat_route::chat,
    fact_check::fact_check_route::fact_check, health::health_route::health,
};

/// Default listen port when `PORT` is unset.
const DEFAULT_PORT: u16 = 8000;

pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);

    let addr = format!("0.0.0.0:{}", listen_port()?);

    let app = Router::new()
        .route("/chat", post(chat))
        .route("/action", post(perform_action))
        .route("/fact-check", post(fact_check))
        .route("/health", get(health))
        .with_state(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;
    tracing::info!(%addr, "space guide API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

fn listen_port() -> Result<u16, AppError> {
    match std::env::var("PORT") {
        Ok(v) if !v.trim().is_empty() => {
            v.trim().parse::<u16>().map_err(|_| AppError::InvalidPort(v))
        }
        _ => Ok(DEFAULT_PORT),
    }
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
