//! JSONL-backed embedding store with cosine top-k retrieval.

use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::PathBuf,
};

use tracing::{debug, info};

use crate::{
    VectorStoreConfig,
    chunker::chunk_text,
    embed::EmbeddingsProvider,
    errors::StoreError,
    record::EmbeddedChunk,
};

/// Name of the JSONL file holding the records inside the store directory.
const RECORDS_FILE: &str = "records.jsonl";

/// A retrieval hit: similarity score plus the matching record.
#[derive(Clone, Debug)]
pub struct ScoredChunk {
    pub score: f32,
    pub chunk: EmbeddedChunk,
}

/// Local embedding database over one JSONL file.
pub struct EmbeddingStore {
    dir: PathBuf,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl EmbeddingStore {
    /// Opens (and creates if needed) the store directory.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(cfg: VectorStoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&cfg.dir)?;
        Ok(Self {
            dir: cfg.dir,
            chunk_size: cfg.chunk_size,
            chunk_overlap: cfg.chunk_overlap,
        })
    }

    /// Splits documents into chunks, embeds them, and appends the records.
    /// Returns the number of chunks written. A no-op for an empty input.
    ///
    /// # Errors
    /// - [`StoreError::Embed`] if the provider fails for any chunk
    /// - [`StoreError::Io`] if the records file cannot be written
    pub async fn add_documents(
        &self,
        documents: &[String],
        provider: &dyn EmbeddingsProvider,
    ) -> Result<usize, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let mut records = Vec::new();
        for (doc_idx, doc) in documents.iter().enumerate() {
            for (chunk_idx, text) in chunk_text(doc, self.chunk_size, self.chunk_overlap)
                .into_iter()
                .enumerate()
            {
                let embedding = provider.embed(&text).await?;
                records.push(EmbeddedChunk {
                    id: format!("doc{doc_idx}-chunk{chunk_idx}"),
                    text,
                    source: None,
                    embedding,
                });
            }
        }

        info!(chunks = records.len(), "adding chunks to the vector store");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.records_path())?;
        for record in &records {
            let line = serde_json::to_string(record)
                .map_err(|e| StoreError::Parse(format!("record serialization: {e}")))?;
            writeln!(file, "{line}")?;
        }

        Ok(records.len())
    }

    /// Reads every record back from the JSONL file. An absent file is an
    /// empty store.
    ///
    /// # Errors
    /// - [`StoreError::Io`] if the file cannot be read
    /// - [`StoreError::Parse`] if any non-empty line fails to deserialize
    pub fn load(&self) -> Result<Vec<EmbeddedChunk>, StoreError> {
        let path = self.records_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        let mut out = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: EmbeddedChunk = serde_json::from_str(&line)
                .map_err(|e| StoreError::Parse(format!("line {} parse error: {}", i + 1, e)))?;
            out.push(record);
        }
        debug!(records = out.len(), "loaded vector store records");
        Ok(out)
    }

    /// Embeds `query` and returns the `top_k` records ranked by cosine
    /// similarity.
    ///
    /// # Errors
    /// Propagates provider and load failures.
    pub async fn search(
        &self,
        query: &str,
        provider: &dyn EmbeddingsProvider,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, StoreError> {
        let query_embedding = provider.embed(query).await?;
        let mut hits: Vec<ScoredChunk> = self
            .load()?
            .into_iter()
            .map(|chunk| ScoredChunk {
                score: cosine(&query_embedding, &chunk.embedding),
                chunk,
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        Ok(hits)
    }

    fn records_path(&self) -> PathBuf {
        self.dir.join(RECORDS_FILE)
    }
}

/// Cosine similarity; zero for mismatched dimensions or zero-norm vectors.
fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{future::Future, pin::Pin};

    /// Deterministic offline embedder: counts a few character classes.
    struct CountingEmbedder;

    impl EmbeddingsProvider for CountingEmbedder {
        fn embed<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
            let v = vec![
                text.chars().filter(|c| c.is_alphabetic()).count() as f32,
                text.chars().filter(|c| c.is_numeric()).count() as f32,
                text.chars().filter(|c| c.is_whitespace()).count() as f32,
                text.len() as f32,
            ];
            Box::pin(async move { Ok(v) })
        }
    }

    fn store(dir: &std::path::Path) -> EmbeddingStore {
        EmbeddingStore::open(VectorStoreConfig {
            dir: dir.to_path_buf(),
            chunk_size: 40,
            chunk_overlap: 5,
        })
        .unwrap()
    }

    #[test]
    fn cosine_basics() {
        assert_eq!(cosine(&[1.0, 0.0], &[1.0, 0.0]), 1.0);
        assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn add_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let docs = vec!["The Moon orbits the Earth every 27.3 days, tidally locked.".to_string()];
        let written = store.add_documents(&docs, &CountingEmbedder).await.unwrap();
        assert!(written >= 2); // 59 chars with chunk_size 40 must split

        let records = store.load().unwrap();
        assert_eq!(records.len(), written);
        assert_eq!(records[0].id, "doc0-chunk0");
        assert_eq!(records[0].embedding.len(), 4);
    }

    #[tokio::test]
    async fn empty_input_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());
        assert_eq!(store.add_documents(&[], &CountingEmbedder).await.unwrap(), 0);
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_ranks_identical_text_first() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let docs = vec![
            "alpha beta gamma".to_string(),
            "1234567890 42".to_string(),
        ];
        store.add_documents(&docs, &CountingEmbedder).await.unwrap();

        let hits = store.search("alpha beta gamma", &CountingEmbedder, 1).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chunk.text, "alpha beta gamma");
        assert!(hits[0].score > 0.99);
    }
}
