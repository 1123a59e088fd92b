//! Typed error for the vector-store crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted JSONL row could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The embedding provider failed.
    #[error("embedding error: {0}")]
    Embed(String),
}
