//! Offline feature-hashing embedder.
//!
//! Lowercased character trigrams are hashed with seahash into a
//! fixed number of signed buckets, then L2-normalized. No model
//! download, fully deterministic across runs and platforms.

use crate::core::embedding::Embedder;
use crate::core::error::{PdfMemError, Result};

const NGRAM: usize = 3;

/// Character-trigram hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    name: String,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(PdfMemError::ConfigError(
                "Hashing dimension must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            dimension,
            name: format!("hashing-trigram-{dimension}"),
        })
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let chars: Vec<char> = text.to_lowercase().chars().collect();

        // Short texts contribute their whole content as one feature
        let grams: Vec<String> = if chars.len() < NGRAM {
            vec![chars.iter().collect()]
        } else {
            chars.windows(NGRAM).map(|w| w.iter().collect()).collect()
        };

        for gram in grams.iter().filter(|g| !g.is_empty()) {
            let hash = seahash::hash(gram.as_bytes());
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if (hash >> 63) & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Embedder for HashingEmbedder {
    fn model_name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}
