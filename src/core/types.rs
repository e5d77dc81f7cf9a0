//! Core data types for the ingestion pipeline.
//!
//! Documents flow from the loader into the chunker, chunks into the
//! embedder, and embeddings into the vector store.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a piece of text came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Source file path
    pub source: PathBuf,

    /// Zero-based page number (PDF sources only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,

    /// Page count of the source file (PDF sources only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
}

impl SourceMetadata {
    /// Metadata for a whole-file text source
    pub fn file(source: PathBuf) -> Self {
        Self {
            source,
            page: None,
            total_pages: None,
        }
    }

    /// Metadata for a single page of a paged source
    pub fn page(source: PathBuf, page: usize, total_pages: usize) -> Self {
        Self {
            source,
            page: Some(page),
            total_pages: Some(total_pages),
        }
    }
}

/// A loaded document: one PDF page or one text file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Extracted text
    pub text: String,

    /// Source metadata, inherited by every chunk
    pub metadata: SourceMetadata,
}

/// A single text chunk from a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// The actual text content
    pub text: String,

    /// Metadata of the parent document
    pub metadata: SourceMetadata,

    /// Character offset where the chunk starts in the document
    pub start_char: usize,

    /// Character offset where the chunk ends (exclusive)
    pub end_char: usize,

    /// Sequential chunk number within the document
    pub chunk_index: usize,
}

/// A chunk paired with its embedding vector
#[derive(Debug, Clone)]
pub struct Embedding {
    pub vector: Vec<f32>,
    pub chunk: Chunk,
}

/// Statistics from an ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of source files read
    pub files_loaded: usize,

    /// Number of non-empty documents (pages or text files)
    pub documents_loaded: usize,

    /// Total chunks created
    pub chunks_created: usize,

    /// Entries written to the vector index
    pub vectors_indexed: usize,

    /// Embedding dimension
    pub dimension: usize,

    /// Embedding model identifier
    pub model_name: String,

    /// Store directory the index was written to
    pub index_path: PathBuf,

    /// Total run duration in milliseconds
    pub duration_ms: u64,
}
