//! UTF-8 safe text chunking.
//!
//! Implements character-based chunking that never panics on
//! multi-byte UTF-8 sequences. Sizes and offsets are counted in
//! characters, never bytes, so every boundary falls on a valid
//! character boundary.
//!
//! # Example
//!
//! ```
//! use pdfmem::core::indexer::Chunker;
//! use pdfmem::core::types::SourceMetadata;
//! use std::path::PathBuf;
//!
//! let chunker = Chunker::new(800, 200).unwrap();
//! let text = "x".repeat(1000);
//! let meta = SourceMetadata::file(PathBuf::from("doc.txt"));
//! let chunks = chunker.chunk_text(&text, &meta);
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[1].start_char, 600);
//! ```

use crate::core::error::{PdfMemError, Result};
use crate::core::types::{Chunk, Document, SourceMetadata};

/// UTF-8 safe text chunker.
///
/// Splits text into fixed-size windows where each window after the
/// first begins `overlap` characters before the end of the previous
/// one.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Number of characters per chunk
    chunk_size: usize,

    /// Number of characters to overlap between consecutive chunks
    overlap: usize,
}

impl Chunker {
    /// Create a new chunker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `chunk_size` is 0 or if
    /// `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PdfMemError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(PdfMemError::ConfigError(format!(
                "Overlap ({overlap}) must be less than chunk size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the overlap size in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk every document, preserving document and chunk order.
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| self.chunk_text(&doc.text, &doc.metadata))
            .collect()
    }

    /// Chunk text into overlapping segments.
    ///
    /// Windows are `[start, min(start + chunk_size, len))` with
    /// `start` advancing by `chunk_size - overlap`. The walk stops
    /// at the first window that reaches the end of the text, so no
    /// trailing chunk is a pure suffix of its predecessor.
    pub fn chunk_text(&self, text: &str, metadata: &SourceMetadata) -> Vec<Chunk> {
        // (byte offset, char) pairs; we never index by raw bytes
        let char_indices: Vec<(usize, char)> = text.char_indices().collect();
        let total_chars = char_indices.len();

        if total_chars == 0 {
            return Vec::new();
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut char_start = 0;

        loop {
            let char_end = (char_start + self.chunk_size).min(total_chars);

            let byte_start = char_indices[char_start].0;
            let byte_end = if char_end < total_chars {
                char_indices[char_end].0
            } else {
                text.len()
            };

            chunks.push(Chunk {
                text: text[byte_start..byte_end].to_string(),
                metadata: metadata.clone(),
                start_char: char_start,
                end_char: char_end,
                chunk_index: chunks.len(),
            });

            if char_end == total_chars {
                break;
            }
            char_start += step;
        }

        chunks
    }
}
