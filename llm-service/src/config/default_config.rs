//! Default Gemini configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by role:
//!
//! - **Answer**   → main Q&A generation (moderate temperature)
//! - **Checker**  → fact-check validation (low temperature)
//! - **Creative** → follow-up question suggestions (high temperature)
//! - **Explain**  → ELI5 / deep-dive rewrites (middle temperature)
//! - **Embedding** → embedding generator for the vector-store helper
//!
//! Environment reads happen here, once, at startup; the resulting configs are
//! passed into services explicitly.
//!
//! # Environment variables
//!
//! - `GOOGLE_API_KEY`   = API key (mandatory)
//! - `GEMINI_URL`       = API base URL (optional, defaults to the public endpoint)
//! - `GEMINI_MODEL`     = generation model (optional, defaults to `gemini-2.5-flash`)
//! - `EMBEDDING_MODEL`  = embedding model (optional, defaults to `text-embedding-004`)
//! - `LLM_MAX_TOKENS`   = optional max output tokens (u32)

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{LlmServiceError, env_opt_u32, must_env, validate_http_endpoint},
};

/// Public Gemini API base used when `GEMINI_URL` is unset.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model when `GEMINI_MODEL` is unset.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Default embedding model when `EMBEDDING_MODEL` is unset.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Resolves the Gemini endpoint, validating the scheme when overridden.
fn gemini_endpoint() -> Result<String, LlmServiceError> {
    match std::env::var("GEMINI_URL") {
        Ok(url) if !url.trim().is_empty() => {
            validate_http_endpoint("GEMINI_URL", url.trim())?;
            Ok(url.trim().to_string())
        }
        _ => Ok(DEFAULT_GEMINI_URL.to_string()),
    }
}

fn generation_model() -> String {
    std::env::var("GEMINI_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
}

fn base_config(temperature: f32, top_p: Option<f32>) -> Result<LlmModelConfig, LlmServiceError> {
    Ok(LlmModelConfig {
        model: generation_model(),
        endpoint: gemini_endpoint()?,
        api_key: must_env("GOOGLE_API_KEY")?,
        max_output_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(temperature),
        top_p,
        timeout_secs: Some(60),
    })
}

/// Config for the main **answer** role.
///
/// # Defaults
/// - `temperature = Some(0.4)`
/// - `timeout_secs = Some(60)`
pub fn config_gemini_answer() -> Result<LlmModelConfig, LlmServiceError> {
    base_config(0.4, None)
}

/// Config for the **fact-check** role. Low temperature keeps verdicts stable
/// across runs.
pub fn config_gemini_checker() -> Result<LlmModelConfig, LlmServiceError> {
    base_config(0.2, None)
}

/// Config for the **creative** role used by follow-up question suggestions.
///
/// # Defaults
/// - `temperature = Some(0.7)`
/// - `top_p = Some(0.9)`
pub fn config_gemini_creative() -> Result<LlmModelConfig, LlmServiceError> {
    base_config(0.7, Some(0.9))
}

/// Config for the **explain** role (`eli5` / `deep_dive` rewrites).
pub fn config_gemini_explain() -> Result<LlmModelConfig, LlmServiceError> {
    base_config(0.5, None)
}

/// Config for the **embedding** role.
///
/// # Defaults
/// - deterministic (`temperature = Some(0.0)`)
/// - `timeout_secs = Some(30)`
pub fn config_gemini_embedding() -> Result<LlmModelConfig, LlmServiceError> {
    Ok(LlmModelConfig {
        model: std::env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        endpoint: gemini_endpoint()?,
        api_key: must_env("GOOGLE_API_KEY")?,
        max_output_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
