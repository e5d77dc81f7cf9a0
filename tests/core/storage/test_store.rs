// Persisted store: file layout, metadata, validation

use crate::common::{test_options, TestDocs, TEST_DIMENSION};
use pdfmem::core::config::Metric;
use pdfmem::core::indexer::build_vector_store;
use pdfmem::core::storage::{
    FlatIndex, StoreMetadata, StoreValidator, VectorStore, INDEX_FILE, META_FILE, SCHEMA_VERSION,
};

#[test]
fn test_metadata_records_run_parameters() {
    let docs = TestDocs::medical_notes();
    let mut options = test_options(&docs, "*.txt");
    options.chunk_size = 500;
    options.overlap = 50;
    options.metric = Metric::Cosine;

    let stats = build_vector_store(&options).unwrap();

    let raw = std::fs::read_to_string(docs.index_dir().join(META_FILE)).unwrap();
    let meta: StoreMetadata = serde_json::from_str(&raw).unwrap();

    assert_eq!(meta.schema_version, SCHEMA_VERSION);
    assert_eq!(meta.dimension, TEST_DIMENSION);
    assert_eq!(meta.metric, Metric::Cosine);
    assert_eq!(meta.chunk_size, 500);
    assert_eq!(meta.overlap, 50);
    assert_eq!(meta.documents_count, 3);
    assert_eq!(meta.chunks_count, stats.chunks_created);
    assert_eq!(meta.source_dir, docs.data_dir());
    assert_eq!(meta.model_name, stats.model_name);
}

#[test]
fn test_index_file_header() {
    let docs = TestDocs::with_files(&[("a.txt", "short note")]);
    build_vector_store(&test_options(&docs, "*.txt")).unwrap();

    let bytes = std::fs::read(docs.index_dir().join(INDEX_FILE)).unwrap();
    assert_eq!(&bytes[..4], b"PMFX");

    let index = FlatIndex::from_bytes(&bytes).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.dimension(), TEST_DIMENSION);
    assert_eq!(index.metric(), Metric::L2);
}

#[test]
fn test_validator_accepts_fresh_store() {
    let docs = TestDocs::medical_notes();
    let stats = build_vector_store(&test_options(&docs, "*.txt")).unwrap();

    let report = StoreValidator::new(&docs.index_dir()).validate().unwrap();

    assert!(report.is_consistent);
    assert_eq!(report.index_entries, stats.vectors_indexed);
    assert_eq!(report.docstore_entries, stats.vectors_indexed);
}

#[test]
fn test_validator_flags_swapped_index() {
    // Index from one run, docstore and metadata from another
    let big = TestDocs::medical_notes();
    build_vector_store(&test_options(&big, "*.txt")).unwrap();
    let small = TestDocs::with_files(&[("a.txt", "tiny")]);
    build_vector_store(&test_options(&small, "*.txt")).unwrap();

    std::fs::copy(
        small.index_dir().join(INDEX_FILE),
        big.index_dir().join(INDEX_FILE),
    )
    .unwrap();

    let report = StoreValidator::new(&big.index_dir()).validate().unwrap();
    assert!(!report.is_consistent);
    assert!(!report.counts_match);

    let err = VectorStore::load(&big.index_dir()).unwrap_err();
    assert!(err.is_storage());
}

#[test]
fn test_output_directory_is_created() {
    let docs = TestDocs::with_files(&[("a.txt", "content")]);
    let mut options = test_options(&docs, "*.txt");
    options.output_dir = docs.path().join("deep").join("nested").join("store");

    build_vector_store(&options).unwrap();

    assert!(options.output_dir.join(INDEX_FILE).is_file());
}

#[test]
fn test_unwritable_output_is_storage_error() {
    let docs = TestDocs::with_files(&[("a.txt", "content")]);
    // A regular file where the output directory should be
    let blocker = docs.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut options = test_options(&docs, "*.txt");
    options.output_dir = blocker.join("store");

    let err = build_vector_store(&options).unwrap_err();
    assert!(err.is_storage());
    assert_eq!(err.exit_code(), 5);
}
