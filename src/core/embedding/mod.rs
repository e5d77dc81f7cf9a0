//! Text embedding.
//!
//! An [`Embedder`] maps chunk text to a fixed-length vector. The
//! model behind it is loaded once per run and reused for every chunk.
//!
//! # Backends
//!
//! - **bert**: sentence-transformers BERT model on CPU (candle)
//! - **hashing**: offline character-trigram feature hashing

mod bert;
mod hashing;

pub use bert::BertEmbedder;
pub use hashing::HashingEmbedder;

use crate::core::config::{EmbeddingBackend, EmbeddingConfig};
use crate::core::error::{PdfMemError, Result};
use crate::core::types::{Chunk, Embedding};
use crate::core::xdg::XdgDirs;

/// Maps text to fixed-length vectors
pub trait Embedder {
    /// Identifier of the underlying model
    fn model_name(&self) -> &str;

    /// Length of every produced vector
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, one vector per input in input order
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text])?
            .pop()
            .ok_or_else(|| PdfMemError::EmbeddingFailed("Model returned no vector".to_string()))
    }
}

/// Instantiate the configured embedding backend
pub fn create_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    match config.backend {
        EmbeddingBackend::Bert => {
            let cache_dir = match &config.cache_dir {
                Some(dir) => dir.clone(),
                None => XdgDirs::new().ensure_models_dir().map_err(|e| {
                    PdfMemError::ModelLoadError(format!("Cannot create model cache: {e}"))
                })?,
            };
            Ok(Box::new(BertEmbedder::load(config, &cache_dir)?))
        }
        EmbeddingBackend::Hashing => {
            Ok(Box::new(HashingEmbedder::new(config.hashing_dimension)?))
        }
    }
}

/// Embed every chunk, `batch_size` chunks per model call
///
/// Returns exactly one [`Embedding`] per chunk, in chunk order.
pub fn embed_chunks(
    embedder: &dyn Embedder,
    chunks: Vec<Chunk>,
    batch_size: usize,
) -> Result<Vec<Embedding>> {
    let batch_size = batch_size.max(1);
    let total = chunks.len();
    let mut embeddings = Vec::with_capacity(total);
    let mut pending = chunks.into_iter().peekable();

    while pending.peek().is_some() {
        let batch: Vec<Chunk> = pending.by_ref().take(batch_size).collect();
        let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
        let vectors = embedder.embed_batch(&texts)?;

        if vectors.len() != batch.len() {
            return Err(PdfMemError::EmbeddingFailed(format!(
                "Model returned {} vectors for {} chunks",
                vectors.len(),
                batch.len()
            )));
        }

        for (vector, chunk) in vectors.into_iter().zip(batch) {
            if vector.len() != embedder.dimension() {
                return Err(PdfMemError::EmbeddingFailed(format!(
                    "Expected {}-dimensional vector, got {}",
                    embedder.dimension(),
                    vector.len()
                )));
            }
            embeddings.push(Embedding { vector, chunk });
        }

        tracing::debug!("Embedded {}/{} chunks", embeddings.len(), total);
    }

    Ok(embeddings)
}
