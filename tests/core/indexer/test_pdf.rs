// PDF loading: one document per non-empty page

use crate::common::{test_options, TestDocs};
use pdfmem::core::indexer::loader::load_pdf;
use pdfmem::core::indexer::{build_vector_store, DirectoryLoader};
use pdfmem::core::storage::VectorStore;
use pdfmem::PdfMemError;

#[test]
fn test_load_single_page_pdf() {
    let docs = TestDocs::with_pdf("hello.pdf", &["Hello from page one"]);

    let documents = load_pdf(&docs.files[0]).unwrap();

    assert_eq!(documents.len(), 1);
    assert!(documents[0].text.contains("Hello"));
    assert_eq!(documents[0].metadata.page, Some(0));
    assert_eq!(documents[0].metadata.total_pages, Some(1));
    assert_eq!(documents[0].metadata.source, docs.files[0]);
}

#[test]
fn test_empty_pages_are_dropped() {
    let docs = TestDocs::with_pdf("mixed.pdf", &["First page", "", "Third page"]);

    let documents = load_pdf(&docs.files[0]).unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].metadata.page, Some(0));
    assert_eq!(documents[1].metadata.page, Some(2));
    assert!(documents.iter().all(|d| d.metadata.total_pages == Some(3)));
}

#[test]
fn test_pdf_with_no_text_gives_no_documents() {
    let docs = TestDocs::with_pdf("blank.pdf", &["", ""]);

    let loader = DirectoryLoader::new("*.pdf", false, 10).unwrap();
    let err = loader.load(&docs.data_dir()).unwrap_err();

    assert!(matches!(err, PdfMemError::NoDocuments(_)));
}

#[test]
fn test_only_pdfs_matched_by_default_glob() {
    let mut docs = TestDocs::with_files(&[("notes.txt", "plain text is ignored")]);
    docs.add_pdf("report.pdf", &["Quarterly report"]);

    let loader = DirectoryLoader::new("*.pdf", false, 10).unwrap();
    let loaded = loader.load(&docs.data_dir()).unwrap();

    assert_eq!(loaded.files.len(), 1);
    assert!(loaded.files[0].ends_with("report.pdf"));
}

#[test]
fn test_ingest_pdfs_page_metadata_in_docstore() {
    let mut docs = TestDocs::with_pdf("a.pdf", &["Alpha page one", "Alpha page two"]);
    docs.add_pdf("b.pdf", &["Beta only page"]);
    let options = test_options(&docs, "*.pdf");

    let stats = build_vector_store(&options).unwrap();
    let store = VectorStore::load(&options.output_dir).unwrap();

    assert_eq!(stats.files_loaded, 2);
    assert_eq!(stats.documents_loaded, 3);
    assert_eq!(store.len(), 3);

    let pages: Vec<(bool, Option<usize>)> = store
        .docstore()
        .iter()
        .map(|e| (e.source.ends_with("a.pdf"), e.page))
        .collect();
    assert_eq!(pages, vec![(true, Some(0)), (true, Some(1)), (false, Some(0))]);
}

#[test]
fn test_corrupt_pdf_aborts_ingestion() {
    let docs = TestDocs::with_pdf("good.pdf", &["Valid content"]);
    std::fs::write(docs.data_dir().join("broken.pdf"), b"%PDF-1.5 garbage").unwrap();
    let options = test_options(&docs, "*.pdf");

    let err = build_vector_store(&options).unwrap_err();

    assert!(matches!(err, PdfMemError::ExtractionFailed(_)));
    assert!(!docs.index_dir().exists());
}
