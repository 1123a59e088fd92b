//! Shared Gemini service used by every model-facing component of the backend.
//!
//! - Construct [`service_profiles::LlmServiceProfiles`] once, wrap in `Arc`,
//!   and pass clones to dependents.
//! - Each generation role (answer, checker, creative, explain) carries its own
//!   fixed sampling configuration; embedding has a dedicated model.
//! - Underlying HTTP clients are cached per config (endpoint+model+key+timeout).

pub mod config;
pub mod error_handler;
pub mod gemini_service;
pub mod health_service;
pub mod service_profiles;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::LlmServiceError;
pub use health_service::HealthStatus;
pub use service_profiles::{LlmServiceProfiles, ProfileKind};
