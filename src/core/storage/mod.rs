//! Storage layer for the persisted vector store.
//!
//! # Architecture
//!
//! - **FlatIndex**: exact nearest-neighbour index with a binary codec
//! - **VectorStore**: index + docstore + metadata, saved as one directory
//! - **StoreValidator**: cross-checks the files of a saved store
//!
//! # Store Structure
//!
//! ```text
//! vectorstore/db_faiss/
//! ├── index.bin       # Vectors (little-endian f32)
//! ├── docstore.json   # Chunk text and provenance, by position
//! └── meta.json       # Model, dimension, metric, counts
//! ```

mod flat;
mod store;
mod validator;

pub use flat::{FlatIndex, Neighbor};
pub use store::{
    DocstoreEntry, SearchHit, StoreMetadata, VectorStore, DOCSTORE_FILE, INDEX_FILE, META_FILE,
    SCHEMA_VERSION,
};
pub use validator::{StoreValidator, ValidationReport};
