//! Agent layer: prompt builders plus the per-request orchestrator.
//!
//! The flow for a chat request: gather arXiv/Wikipedia context, build the
//! matching [`chains::AgentChain`] (text-only or image-augmented), run it
//! through a [`backend::ChainBackend`], normalize the structured result, and
//! optionally merge a fact-check verdict from a second model call.
//!
//! Builders are pure constructors; all network I/O happens behind the
//! [`backend::ChainBackend`] and [`backend::ContextProvider`] seams, which is
//! also what the tests stub out.

pub mod api_types;
pub mod backend;
pub mod chains;
pub mod error;
pub mod orchestrator;
pub mod prompt;

pub use api_types::{ActionOutcome, FactCheckReport, FollowUpAction, StructuredAnswer};
pub use backend::{ChainBackend, ChainOutput, ContextProvider, LlmChainBackend, SearchContext};
pub use error::AgentError;
pub use orchestrator::{FactCheckPolicy, Orchestrator};
