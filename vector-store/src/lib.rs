//! Chunking and embedding helper for reference documents.
//!
//! Splits documents into overlapping chunks, embeds them through an
//! [`embed::EmbeddingsProvider`], and appends the results as JSONL records
//! under a local directory. Retrieval is a cosine top-k scan over the loaded
//! records. No HTTP endpoint is wired to this crate; it serves offline
//! ingestion and experiments.

mod chunker;
pub mod embed;
mod errors;
mod record;
mod store;

pub use chunker::chunk_text;
pub use embed::{EmbeddingsProvider, GeminiEmbedder};
pub use errors::StoreError;
pub use record::EmbeddedChunk;
pub use store::{EmbeddingStore, ScoredChunk};

use std::path::PathBuf;

/// Default directory for the local embedding database.
pub const STORE_DIR: &str = "embedding_db";

/// Max size of each chunk, in characters.
pub const CHUNK_SIZE: usize = 1000;

/// Overlap between consecutive chunks to maintain context, in characters.
pub const CHUNK_OVERLAP: usize = 100;

/// Store configuration; [`VectorStoreConfig::default`] uses the crate
/// constants.
#[derive(Clone, Debug)]
pub struct VectorStoreConfig {
    pub dir: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(STORE_DIR),
            chunk_size: CHUNK_SIZE,
            chunk_overlap: CHUNK_OVERLAP,
        }
    }
}
