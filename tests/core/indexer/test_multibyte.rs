// UTF-8 safety tests: Multibyte character handling
//
// Validates correct handling of CJK, Arabic, Cyrillic, emoji and
// other multibyte UTF-8 characters through the whole pipeline.

use crate::common::{test_options, TestDocs};
use pdfmem::core::indexer::{build_vector_store, Chunker};
use pdfmem::core::storage::VectorStore;
use pdfmem::core::types::SourceMetadata;
use std::path::PathBuf;

fn ingest_single(name: &str, content: &str, chunk_size: usize, overlap: usize) -> VectorStore {
    let docs = TestDocs::with_files(&[(name, content)]);
    let mut options = test_options(&docs, "*.txt");
    options.chunk_size = chunk_size;
    options.overlap = overlap;

    build_vector_store(&options).unwrap();
    VectorStore::load(&options.output_dir).unwrap()
}

#[test]
fn test_index_chinese_characters() {
    let content = "高血压是一种慢性疾病，动脉血压持续升高。".repeat(20);
    let store = ingest_single("chinese.txt", &content, 50, 10);

    assert!(store.len() > 1);
    for entry in store.docstore() {
        assert!(entry.text.chars().count() <= 50);
    }
}

#[test]
fn test_index_arabic_characters() {
    let store = ingest_single("arabic.txt", "مرحبا بالعالم، هذا نص عربي للاختبار", 10, 3);
    assert!(store.docstore().iter().any(|e| e.text.contains("مرحبا")));
}

#[test]
fn test_index_cyrillic_characters() {
    let store = ingest_single("russian.txt", "Привет мир! Русский текст для проверки.", 12, 4);
    assert!(!store.is_empty());
}

#[test]
fn test_index_emoji_boundaries() {
    // Every chunk boundary falls between emoji
    let content = "🦀🔥✅🎉".repeat(50);
    let store = ingest_single("emoji.txt", &content, 7, 2);

    for entry in store.docstore() {
        assert_eq!(entry.text.chars().count(), entry.end_char - entry.start_char);
    }
}

#[test]
fn test_multibyte_overlap_reconstructs_text() {
    let content = "naïve café — 東京 🚀 Zürich ".repeat(30);
    let chunker = Chunker::new(40, 15).unwrap();
    let chunks = chunker.chunk_text(&content, &SourceMetadata::file(PathBuf::from("mixed.txt")));

    let mut rebuilt: String = chunks[0].text.clone();
    for chunk in &chunks[1..] {
        rebuilt.extend(chunk.text.chars().skip(15));
    }

    assert_eq!(rebuilt, content);
}

#[test]
fn test_multibyte_overlap_shared_text() {
    let content = "ÄÖÜäöüß€".repeat(200);
    let chunker = Chunker::new(800, 200).unwrap();
    let chunks = chunker.chunk_text(&content, &SourceMetadata::file(PathBuf::from("de.txt")));

    for pair in chunks.windows(2) {
        let tail: String = pair[0].text.chars().skip(600).collect();
        let head: String = pair[1].text.chars().take(200).collect();
        assert_eq!(tail, head);
    }
}
