//! Shared LLM service with one profile per generation role.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches underlying HTTP clients per config (endpoint+model+key+timeout);
//!   roles that share a config share a client.
//! - Provides convenience methods for plain, structured, and embedding calls.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::service_profiles::{LlmServiceProfiles, ProfileKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm_service::LlmServiceError> {
//!     let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//!     let txt = svc.generate(ProfileKind::Explain, "Explain tides simply.", None).await?;
//!     println!("{txt}");
//!
//!     let emb = svc.embed("Betelgeuse").await?;
//!     println!("Embedding dim = {}", emb.len());
//!
//!     Ok(())
//! }
//! ```

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    config::{
        default_config::{
            config_gemini_answer, config_gemini_checker, config_gemini_creative,
            config_gemini_embedding, config_gemini_explain,
        },
        llm_model_config::LlmModelConfig,
    },
    error_handler::LlmServiceError,
    gemini_service::GeminiService,
    health_service::{HealthService, HealthStatus},
};

/// Generation roles exposed by the service.
///
/// Each role maps to a fixed sampling configuration; the mapping is decided at
/// construction and never per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Main Q&A answering (moderate temperature).
    Answer,
    /// Fact-check validation (low temperature).
    Checker,
    /// Follow-up question suggestions (high temperature).
    Creative,
    /// ELI5 / deep-dive rewrites.
    Explain,
}

/// Shared service that manages the per-role model profiles plus a dedicated
/// embedding profile.
///
/// Internally, it caches Gemini clients keyed by their configuration to avoid
/// recreating HTTP clients on each call.
pub struct LlmServiceProfiles {
    answer: LlmModelConfig,
    checker: LlmModelConfig,
    creative: LlmModelConfig,
    explain: LlmModelConfig,
    embedding: LlmModelConfig,

    clients: RwLock<HashMap<ClientKey, Arc<GeminiService>>>,

    health: HealthService,
}

impl LlmServiceProfiles {
    /// Creates a new service with explicit per-role configs.
    ///
    /// - `health_timeout_secs`: optional timeout for the health checker.
    pub fn new(
        answer: LlmModelConfig,
        checker: LlmModelConfig,
        creative: LlmModelConfig,
        explain: LlmModelConfig,
        embedding: LlmModelConfig,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, LlmServiceError> {
        Ok(Self {
            answer,
            checker,
            creative,
            explain,
            embedding,
            clients: RwLock::new(HashMap::new()),
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Creates the service from environment variables, reading them once.
    ///
    /// # Errors
    /// Returns [`LlmServiceError::Config`] when `GOOGLE_API_KEY` is missing or
    /// any numeric override fails to parse.
    pub fn from_env() -> Result<Self, LlmServiceError> {
        Self::new(
            config_gemini_answer()?,
            config_gemini_checker()?,
            config_gemini_creative()?,
            config_gemini_explain()?,
            config_gemini_embedding()?,
            Some(10),
        )
    }

    /// Generates plain text using the profile for `kind`.
    ///
    /// # Errors
    /// Returns [`LlmServiceError`] if generation fails.
    pub async fn generate(
        &self,
        kind: ProfileKind,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, LlmServiceError> {
        let cli = self.client_for(self.config_for(kind)).await?;
        cli.generate(prompt, system).await
    }

    /// Generates schema-constrained JSON using the profile for `kind`.
    ///
    /// # Arguments
    /// - `image_base64`: optional inline image payload for multimodal prompts.
    /// - `schema`: response schema enforced by the provider.
    ///
    /// # Errors
    /// Returns [`LlmServiceError`] if generation fails or the response is not
    /// valid JSON.
    pub async fn generate_structured(
        &self,
        kind: ProfileKind,
        prompt: &str,
        system: Option<&str>,
        image_base64: Option<&str>,
        schema: &Value,
    ) -> Result<Value, LlmServiceError> {
        let cli = self.client_for(self.config_for(kind)).await?;
        cli.generate_structured(prompt, system, image_base64, schema)
            .await
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmServiceError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, LlmServiceError> {
        let cli = self.client_for(&self.embedding).await?;
        cli.embed(input).await
    }

    /// Returns a health snapshot for all distinct profile configs.
    ///
    /// Roles sharing a config are probed only once.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let mut list = Vec::<LlmModelConfig>::with_capacity(5);
        for cfg in [
            &self.answer,
            &self.checker,
            &self.creative,
            &self.explain,
            &self.embedding,
        ] {
            if !list.contains(cfg) {
                list.push(cfg.clone());
            }
        }
        self.health.check_many(&list).await
    }

    /// Returns the config backing a generation role.
    pub fn config_for(&self, kind: ProfileKind) -> &LlmModelConfig {
        match kind {
            ProfileKind::Answer => &self.answer,
            ProfileKind::Checker => &self.checker,
            ProfileKind::Creative => &self.creative,
            ProfileKind::Explain => &self.explain,
        }
    }

    /* --------------------- Internals --------------------- */

    async fn client_for(&self, cfg: &LlmModelConfig) -> Result<Arc<GeminiService>, LlmServiceError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.clients.read().await.get(&key).cloned() {
            return Ok(cli);
        }

        // Build outside the write lock; a racing builder just wins the entry.
        let built = Arc::new(GeminiService::new(cfg.clone())?);
        let mut w = self.clients.write().await;
        Ok(w.entry(key).or_insert(built).clone())
    }
}

/// Internal cache key to identify unique client configs.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(temperature: f32) -> LlmModelConfig {
        LlmModelConfig {
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com".into(),
            api_key: "test-key".into(),
            max_output_tokens: None,
            temperature: Some(temperature),
            top_p: None,
            timeout_secs: Some(30),
        }
    }

    fn profiles() -> LlmServiceProfiles {
        LlmServiceProfiles::new(cfg(0.4), cfg(0.2), cfg(0.7), cfg(0.5), cfg(0.0), Some(5))
            .unwrap()
    }

    #[test]
    fn roles_map_to_their_temperatures() {
        let svc = profiles();
        assert_eq!(svc.config_for(ProfileKind::Answer).temperature, Some(0.4));
        assert_eq!(svc.config_for(ProfileKind::Checker).temperature, Some(0.2));
        assert_eq!(svc.config_for(ProfileKind::Creative).temperature, Some(0.7));
        assert_eq!(svc.config_for(ProfileKind::Explain).temperature, Some(0.5));
    }

    #[tokio::test]
    async fn clients_are_cached_per_config() {
        let svc = profiles();
        let a = svc.client_for(&svc.answer).await.unwrap();
        let b = svc.client_for(&svc.answer).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        // Checker shares endpoint/model/key/timeout with answer, so the cache
        // key collapses them onto the same client.
        let c = svc.client_for(&svc.checker).await.unwrap();
        assert!(Arc::ptr_eq(&a, &c));
    }
}
