//! Store validation and consistency checking.
//!
//! Checks that the three files of a store directory agree with each
//! other: index entry count, docstore entry count and metadata chunk
//! count must match, and the index dimension must match the metadata.

use crate::core::error::Result;
use crate::core::storage::store::{read_docstore, read_index, read_metadata, StoreMetadata};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Store validation report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Store directory validated
    pub index_dir: PathBuf,

    /// Recorded metadata
    pub metadata: StoreMetadata,

    /// Actual measured values
    pub index_entries: usize,
    pub docstore_entries: usize,
    pub index_dimension: usize,
    pub size_bytes: u64,

    /// Validation results
    pub counts_match: bool,
    pub dimension_matches: bool,
    pub positions_ordered: bool,
    pub is_consistent: bool,

    /// Validation timestamp
    pub validated_at: String,
}

/// Validator for store directories
pub struct StoreValidator<'a> {
    index_dir: &'a Path,
}

impl<'a> StoreValidator<'a> {
    pub fn new(index_dir: &'a Path) -> Self {
        Self { index_dir }
    }

    /// Read every store file and compare them
    ///
    /// Unreadable or corrupt files are an error; disagreement between
    /// readable files is reported with `is_consistent == false`.
    pub fn validate(&self) -> Result<ValidationReport> {
        let metadata = read_metadata(self.index_dir)?;
        let docstore = read_docstore(self.index_dir)?;
        let index = read_index(self.index_dir)?;

        let counts_match =
            index.len() == docstore.len() && index.len() == metadata.chunks_count;
        let dimension_matches = index.dimension() == metadata.dimension;
        let positions_ordered = docstore
            .iter()
            .enumerate()
            .all(|(i, entry)| entry.position == i);

        let is_consistent = counts_match && dimension_matches && positions_ordered;
        if !is_consistent {
            tracing::warn!(
                "Store {:?} is inconsistent: index={}, docstore={}, metadata={}",
                self.index_dir,
                index.len(),
                docstore.len(),
                metadata.chunks_count
            );
        }

        Ok(ValidationReport {
            index_dir: self.index_dir.to_path_buf(),
            index_entries: index.len(),
            docstore_entries: docstore.len(),
            index_dimension: index.dimension(),
            size_bytes: calculate_directory_size(self.index_dir),
            counts_match,
            dimension_matches,
            positions_ordered,
            is_consistent,
            metadata,
            validated_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Calculate total size of a directory recursively
fn calculate_directory_size(dir_path: &Path) -> u64 {
    if !dir_path.exists() {
        return 0;
    }

    WalkDir::new(dir_path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
