// Test helper functions

use pdfmem::core::config::{EmbeddingBackend, EmbeddingConfig};
use pdfmem::core::indexer::IngestOptions;
use pdfmem::core::types::IndexStats;

use crate::common::fixtures::TestDocs;

/// Embedding dimension used by every offline test
#[allow(dead_code)] // Used in integration tests
pub const TEST_DIMENSION: usize = 384;

/// Hashing-backend embedding config (no network)
#[allow(dead_code)] // Used in integration tests
pub fn hashing_embedding() -> EmbeddingConfig {
    EmbeddingConfig {
        backend: EmbeddingBackend::Hashing,
        hashing_dimension: TEST_DIMENSION,
        ..EmbeddingConfig::default()
    }
}

/// Options reading `docs/data` and writing `docs/vectorstore/db_faiss`
#[allow(dead_code)] // Used in integration tests
pub fn test_options(docs: &TestDocs, glob: &str) -> IngestOptions {
    IngestOptions {
        input_dir: docs.data_dir(),
        glob: glob.to_string(),
        output_dir: docs.index_dir(),
        embedding: hashing_embedding(),
        ..IngestOptions::default()
    }
}

/// Assert that ingestion stats are valid
#[allow(dead_code)] // Used in integration tests
pub fn assert_valid_stats(stats: &IndexStats) {
    assert!(
        stats.files_loaded > 0,
        "Expected files_loaded > 0, got {}",
        stats.files_loaded
    );
    assert!(
        stats.documents_loaded > 0,
        "Expected documents_loaded > 0, got {}",
        stats.documents_loaded
    );
    assert!(
        stats.chunks_created >= stats.documents_loaded,
        "Expected chunks_created ({}) >= documents_loaded ({})",
        stats.chunks_created,
        stats.documents_loaded
    );
    assert_eq!(
        stats.vectors_indexed, stats.chunks_created,
        "Every chunk must have exactly one index entry"
    );
}
