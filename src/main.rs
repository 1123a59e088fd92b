use std::error::Error;

use llm_service::telemetry;
use tracing::Level;
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file.
    // Fails if .env file not found, not readable or invalid.
    dotenvy::dotenv()?;

    let env_filter = telemetry::env_filter_with_level("info", Level::DEBUG);

    // The llm-service layer renders model-call events with file/line detail;
    // the plain layer carries everything else.
    let app_layer = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !meta.target().starts_with(telemetry::TARGET_PREFIX)
        }));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(app_layer)
        .with(telemetry::layer())
        .init();

    api::start().await?;

    Ok(())
}
