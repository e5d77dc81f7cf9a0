//! Document ingestion module.
//!
//! Turns a directory of documents into a persisted vector store.
//! Key features:
//!
//! - PDF page extraction and plain-text loading
//! - UTF-8 safe character-based chunking
//! - Configurable chunk size and overlap
//! - Directory walking with glob filtering
//! - Ingestion pipeline orchestration
//!
//! # Safety
//!
//! The chunker uses character-based slicing via `char_indices()`
//! to ensure UTF-8 safety. This prevents panics when processing
//! text containing emojis, multi-byte characters, or other
//! special Unicode sequences.

pub mod chunker;
pub mod loader;
pub mod pipeline;
pub mod walker;

pub use chunker::Chunker;
pub use loader::{DirectoryLoader, LoadedDocuments};
pub use pipeline::{build_vector_store, build_vector_store_with, IngestOptions, IngestPipeline};
pub use walker::FileWalker;
