//! Persisted record shape.

use serde::{Deserialize, Serialize};

/// One embedded chunk as written to the JSONL store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    /// Stable id: document index plus chunk index.
    pub id: String,
    /// Chunk text.
    pub text: String,
    /// Optional origin label for the source document.
    #[serde(default)]
    pub source: Option<String>,
    /// Embedding vector for the chunk.
    pub embedding: Vec<f32>,
}
