//! Typed error for the context-tools crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// HTTP/transport errors when calling an external search service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response payload could not be decoded as expected.
    #[error("decode error: {0}")]
    Decode(String),
}
