//! Core domain logic
//!
//! Everything needed to turn a directory of documents into a
//! persisted vector store, independent of the CLI.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **indexer**: Loading, chunking and pipeline orchestration
//! - **embedding**: Embedder trait and backends
//! - **storage**: Flat vector index and store persistence

pub mod config;
pub mod embedding;
pub mod error;
pub mod indexer;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{PdfMemError, Result};
