//! pdfmem - PDF ingestion for semantic search
//!
//! Loads PDF pages (and plain-text files) from a directory, splits
//! them into overlapping character chunks, embeds every chunk with a
//! sentence-transformers model, and persists a flat vector index
//! together with the chunk text and store metadata.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (loader, chunker, pipeline)
//!   - embedding (BERT via candle, offline hashing)
//!   - storage (flat index, docstore, validation)
//!
//! - **cli**: `pdfmem` command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - UTF-8 safe chunking (character-based, never panics)
//! - Local CPU inference, models cached from the Hugging Face hub
//! - Exact L2 or cosine search over the persisted index
//! - Full rebuild on every run (no merge, no append)
//!
//! # Example
//!
//! ```no_run
//! use pdfmem::core::indexer::{build_vector_store, IngestOptions};
//!
//! let stats = build_vector_store(&IngestOptions::default())?;
//! println!("{} chunks indexed", stats.vectors_indexed);
//! # Ok::<(), pdfmem::PdfMemError>(())
//! ```

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{PdfMemError, Result};
pub use core::indexer::{build_vector_store, build_vector_store_with, IngestOptions};
pub use core::types::*;
