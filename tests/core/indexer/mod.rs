//! Indexer layer tests
//!
//! End-to-end ingestion, PDF loading, and UTF-8 safety of chunking
//! with multi-byte characters.

mod test_multibyte;
mod test_pdf;
