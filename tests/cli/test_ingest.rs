//! Tests for the ingest CLI command
//!
//! Tests the ingest command handler:
//! - Ingesting with configuration defaults
//! - Flag overrides (output, chunking, backend)
//! - Flags fixing an invalid environment value (through `cli::run`)
//! - Error cases (empty directory, invalid overlap)

use crate::cli::test_helpers::{cli_test_config, quiet_ingest_args};
use crate::common::TestDocs;
use clap::Parser;
use pdfmem::cli::commands::ingest::{execute, IngestArgs};
use pdfmem::cli::{run, Cli, Commands, OutputFormat};
use pdfmem::core::config::{Config, EmbeddingBackend};
use pdfmem::core::storage::VectorStore;
use pdfmem::PdfMemError;
use serial_test::serial;
use std::env;

/// Test ingesting with configuration values only
#[test]
fn test_ingest_human() {
    let docs = TestDocs::medical_notes();
    let config = cli_test_config(&docs, "*.txt");

    let result = execute(quiet_ingest_args(), &config, OutputFormat::Human);
    assert!(result.is_ok(), "Ingest should succeed: {:?}", result.err());

    let store = VectorStore::load(&docs.index_dir()).unwrap();
    assert_eq!(store.metadata().documents_count, 3);
}

/// Test ingesting with JSON output
#[test]
fn test_ingest_json() {
    let docs = TestDocs::with_pdf("report.pdf", &["Annual report summary"]);
    let config = cli_test_config(&docs, "*.pdf");

    let result = execute(quiet_ingest_args(), &config, OutputFormat::Json);
    assert!(result.is_ok(), "Ingest (JSON) should succeed: {:?}", result.err());
}

/// Test that flags override configuration
#[test]
fn test_ingest_flag_overrides() {
    let docs = TestDocs::medical_notes();
    let output = docs.path().join("custom-index");

    // Configuration alone would fail: default glob and bert backend
    let mut config = Config::default();
    config.embedding.backend = EmbeddingBackend::Bert;

    let args = IngestArgs {
        data_dir: Some(docs.data_dir()),
        glob: Some("*.txt".to_string()),
        output: Some(output.clone()),
        chunk_size: Some(300),
        overlap: Some(30),
        backend: Some(EmbeddingBackend::Hashing),
        quiet: true,
        ..IngestArgs::default()
    };

    execute(args, &config, OutputFormat::Json).unwrap();

    let store = VectorStore::load(&output).unwrap();
    assert_eq!(store.metadata().chunk_size, 300);
    assert_eq!(store.metadata().overlap, 30);
    assert!(store.docstore().iter().all(|e| e.text.chars().count() <= 300));
}

/// Test ingesting an empty directory
#[test]
fn test_ingest_empty_directory() {
    let docs = TestDocs::empty();
    let config = cli_test_config(&docs, "*.pdf");

    let err = execute(quiet_ingest_args(), &config, OutputFormat::Human).unwrap_err();

    assert!(matches!(err, PdfMemError::NoDocuments(_)));
    assert_eq!(err.exit_code(), 3);
    assert!(!docs.index_dir().exists());
}

/// Test overlap not smaller than chunk size
#[test]
fn test_ingest_invalid_overlap() {
    let docs = TestDocs::medical_notes();
    let config = cli_test_config(&docs, "*.txt");

    let args = IngestArgs {
        chunk_size: Some(100),
        overlap: Some(150),
        quiet: true,
        ..IngestArgs::default()
    };

    let err = execute(args, &config, OutputFormat::Human).unwrap_err();

    assert!(err.is_config());
    assert_eq!(err.exit_code(), 2);
}

fn ingest_cli(docs: &TestDocs, extra: &[&str]) -> Cli {
    let data_dir = docs.data_dir();
    let output = docs.index_dir();
    let mut argv = vec![
        "pdfmem",
        "--format",
        "json",
        "ingest",
        "--data-dir",
        data_dir.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--glob",
        "*.txt",
        "--backend",
        "hashing",
        "--quiet",
    ];
    argv.extend_from_slice(extra);
    Cli::try_parse_from(argv).unwrap()
}

/// Test that a chunk size flag makes an invalid env overlap usable
#[test]
#[serial]
fn test_flag_fixes_invalid_env_overlap() {
    let docs = TestDocs::medical_notes();
    env::set_var("PDFMEM_OVERLAP", "900");

    let result = run(ingest_cli(&docs, &["--chunk-size", "1200"]));

    env::remove_var("PDFMEM_OVERLAP");
    assert!(result.is_ok(), "Flags should win over env: {:?}", result.err());

    let store = VectorStore::load(&docs.index_dir()).unwrap();
    assert_eq!(store.metadata().chunk_size, 1200);
    assert_eq!(store.metadata().overlap, 900);
}

/// Test that an invalid env overlap still fails without a fixing flag
#[test]
#[serial]
fn test_invalid_env_overlap_without_flag() {
    let docs = TestDocs::medical_notes();
    env::set_var("PDFMEM_OVERLAP", "900");

    let result = run(ingest_cli(&docs, &[]));

    env::remove_var("PDFMEM_OVERLAP");
    let err = result.unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.exit_code(), 2);
    assert!(!docs.index_dir().exists());
}

/// Test that --no-recursive wins over a recursive configuration
#[test]
fn test_no_recursive_flag() {
    let docs = TestDocs::medical_notes();
    std::fs::create_dir_all(docs.data_dir().join("archive")).unwrap();
    std::fs::write(
        docs.data_dir().join("archive").join("old.txt"),
        "Archived note about migraine",
    )
    .unwrap();

    let mut config = cli_test_config(&docs, "*.txt");
    config.loader.recursive = true;

    let cli = Cli::try_parse_from(["pdfmem", "ingest", "--no-recursive", "--quiet"]).unwrap();
    let Commands::Ingest(args) = cli.command else {
        panic!("Expected ingest command");
    };
    execute(args, &config, OutputFormat::Json).unwrap();

    let store = VectorStore::load(&docs.index_dir()).unwrap();
    assert_eq!(store.metadata().documents_count, 3);
}
