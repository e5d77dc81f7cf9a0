//! Document loading.
//!
//! Turns the files found by [`FileWalker`] into [`Document`]s: one
//! per non-empty PDF page, or one per plain-text file.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::core::error::{PdfMemError, Result};
use crate::core::indexer::FileWalker;
use crate::core::types::{Document, SourceMetadata};

/// Result of a loading pass
#[derive(Debug)]
pub struct LoadedDocuments {
    /// Files that matched the filter, in load order
    pub files: Vec<PathBuf>,

    /// Non-empty documents, in file then page order
    pub documents: Vec<Document>,
}

/// Loads every matching file under a directory
#[derive(Debug)]
pub struct DirectoryLoader {
    walker: FileWalker,
    glob: String,
}

impl DirectoryLoader {
    /// Create a loader for files matching `glob`
    pub fn new(glob: &str, recursive: bool, max_file_size_mb: usize) -> Result<Self> {
        Ok(Self {
            walker: FileWalker::new(glob, recursive, max_file_size_mb)?,
            glob: glob.to_string(),
        })
    }

    /// Load all documents from `root`
    ///
    /// # Errors
    ///
    /// - `InvalidPath` if `root` is missing or not a directory
    /// - `NoDocuments` if no file matches, or every match is empty
    /// - `ExtractionFailed` if any matching file cannot be read
    pub fn load(&self, root: &Path) -> Result<LoadedDocuments> {
        let files = self.walker.collect_files(root)?;

        if files.is_empty() {
            return Err(PdfMemError::NoDocuments(format!(
                "no files matching '{}' in {:?}",
                self.glob, root
            )));
        }
        tracing::info!("Found {} files matching '{}'", files.len(), self.glob);

        let mut documents = Vec::new();
        for path in &files {
            let docs = load_file(path)?;
            tracing::debug!("Loaded {:?} ({} documents)", path, docs.len());
            documents.extend(docs);
        }

        if documents.is_empty() {
            return Err(PdfMemError::NoDocuments(format!(
                "{} matching files in {:?} contain no extractable text",
                files.len(),
                root
            )));
        }

        Ok(LoadedDocuments { files, documents })
    }
}

/// Load one file, dispatching on its extension
pub fn load_file(path: &Path) -> Result<Vec<Document>> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if is_pdf {
        load_pdf(path)
    } else {
        load_text(path)
    }
}

/// Extract a PDF page by page; whitespace-only pages are dropped
pub fn load_pdf(path: &Path) -> Result<Vec<Document>> {
    // pdf-extract panics on some malformed inputs
    let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_by_pages(path)
    }))
    .map_err(|_| PdfMemError::ExtractionFailed(format!("PDF parser panicked on {path:?}")))?
    .map_err(|e| PdfMemError::ExtractionFailed(format!("Failed to extract {path:?}: {e}")))?;

    let total_pages = extracted.len();
    let mut documents = Vec::with_capacity(total_pages);

    for (page, text) in extracted.into_iter().enumerate() {
        if text.trim().is_empty() {
            tracing::debug!("Skipping empty page {} of {:?}", page, path);
            continue;
        }
        documents.push(Document {
            text,
            metadata: SourceMetadata::page(path.to_path_buf(), page, total_pages),
        });
    }

    Ok(documents)
}

/// Read a UTF-8 text file as a single document
pub fn load_text(path: &Path) -> Result<Vec<Document>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            PdfMemError::ExtractionFailed(format!("Non-UTF-8 text file: {path:?}"))
        } else {
            PdfMemError::ExtractionFailed(format!("Failed to read {path:?}: {e}"))
        }
    })?;

    if contents.trim().is_empty() {
        tracing::debug!("Skipping empty file: {:?}", path);
        return Ok(Vec::new());
    }

    Ok(vec![Document {
        text: contents,
        metadata: SourceMetadata::file(path.to_path_buf()),
    }])
}
