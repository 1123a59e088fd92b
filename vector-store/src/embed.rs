//! Embedding provider seam.

use std::{future::Future, pin::Pin, sync::Arc};

use llm_service::LlmServiceProfiles;

use crate::errors::StoreError;

/// Provider interface for embedding generation.
///
/// Async is required because real providers perform HTTP requests. Implement
/// this trait to plug in a different embedding backend.
pub trait EmbeddingsProvider: Send + Sync {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;
}

/// Production provider over the shared Gemini embedding profile.
pub struct GeminiEmbedder {
    svc: Arc<LlmServiceProfiles>,
}

impl GeminiEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for GeminiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
        Box::pin(async move {
            self.svc
                .embed(text)
                .await
                .map_err(|e| StoreError::Embed(e.to_string()))
        })
    }
}
