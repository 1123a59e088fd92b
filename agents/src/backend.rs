//! Seams between the orchestrator and the outside world.
//!
//! [`ChainBackend`] runs a chain against a model; [`ContextProvider`] fetches
//! the two text context snippets. Both are object-safe with boxed futures so
//! tests can substitute scripted implementations.

use std::{future::Future, pin::Pin, sync::Arc};

use llm_service::LlmServiceProfiles;
use serde_json::Value;

use crate::chains::AgentChain;
use crate::error::AgentError;

/// Output of one model invocation.
///
/// The invocation layer is required to produce exactly one of these variants;
/// normalization downstream never inspects runtime shapes beyond this enum.
#[derive(Clone, Debug)]
pub enum ChainOutput {
    /// Structured JSON from a schema-constrained call.
    Structured(Value),
    /// Plain text from an unconstrained call.
    Text(String),
}

/// Executes an [`AgentChain`] against a model backend.
pub trait ChainBackend: Send + Sync {
    fn run<'a>(
        &'a self,
        chain: &'a AgentChain,
    ) -> Pin<Box<dyn Future<Output = Result<ChainOutput, AgentError>> + Send + 'a>>;
}

/// Supplies the two prompt context snippets for a query. Implementations never
/// fail; a lookup problem must already be a prompt-visible string.
pub trait ContextProvider: Send + Sync {
    fn paper_context<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>>;

    fn wiki_context<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>>;
}

/// Production backend running chains through the shared Gemini profiles.
pub struct LlmChainBackend {
    svc: Arc<LlmServiceProfiles>,
}

impl LlmChainBackend {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl ChainBackend for LlmChainBackend {
    fn run<'a>(
        &'a self,
        chain: &'a AgentChain,
    ) -> Pin<Box<dyn Future<Output = Result<ChainOutput, AgentError>> + Send + 'a>> {
        Box::pin(async move {
            match &chain.schema {
                Some(schema) => {
                    let value = self
                        .svc
                        .generate_structured(
                            chain.profile,
                            &chain.prompt,
                            chain.system,
                            chain.image_base64.as_deref(),
                            schema,
                        )
                        .await?;
                    Ok(ChainOutput::Structured(value))
                }
                None => {
                    let text = self
                        .svc
                        .generate(chain.profile, &chain.prompt, chain.system)
                        .await?;
                    Ok(ChainOutput::Text(text))
                }
            }
        })
    }
}

/// Production context provider over the arXiv and Wikipedia tools.
pub struct SearchContext {
    arxiv: context_tools::ArxivSearch,
    wikipedia: context_tools::WikipediaSearch,
}

impl SearchContext {
    pub fn new() -> Self {
        Self {
            arxiv: context_tools::ArxivSearch::new(),
            wikipedia: context_tools::WikipediaSearch::new(),
        }
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextProvider for SearchContext {
    fn paper_context<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(self.arxiv.search(query))
    }

    fn wiki_context<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(self.wikipedia.search(query))
    }
}
