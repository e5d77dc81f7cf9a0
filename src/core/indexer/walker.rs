//! File system walker with glob filtering.
//!
//! Collects the source files of an ingestion run. Output is sorted
//! by path so that document order, and therefore index positions,
//! are stable between runs over the same directory.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{PdfMemError, Result};

/// File system walker with pattern-based filtering
#[derive(Debug)]
pub struct FileWalker {
    /// Pattern a file must match (e.g., "*.pdf")
    pattern: Pattern,

    /// Descend into subdirectories
    recursive: bool,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// # Arguments
    ///
    /// * `glob` - Glob pattern for files to include
    /// * `recursive` - Whether to walk subdirectories
    /// * `max_file_size_mb` - Maximum file size in megabytes
    ///
    /// # Returns
    ///
    /// A new `FileWalker` instance or an error if the pattern is
    /// invalid
    pub fn new(glob: &str, recursive: bool, max_file_size_mb: usize) -> Result<Self> {
        let pattern = Pattern::new(glob)
            .map_err(|e| PdfMemError::ConfigError(format!("Invalid glob pattern '{glob}': {e}")))?;

        Ok(Self {
            pattern,
            recursive,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Collect all matching files from a directory
    ///
    /// Fails with `InvalidPath` if `root` does not exist or is not a
    /// directory. An empty result is not an error here; the loader
    /// decides what "nothing to ingest" means.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(PdfMemError::InvalidPath(format!(
                "Input directory {root:?} does not exist"
            )));
        }
        if !root.is_dir() {
            return Err(PdfMemError::InvalidPath(format!(
                "Input path {root:?} is not a directory"
            )));
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|e| Self::should_process_entry(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();

                    if !self.matches_pattern(path, root) {
                        continue;
                    }

                    if let Ok(metadata) = entry.metadata() {
                        if metadata.len() > self.max_file_size_bytes {
                            tracing::warn!(
                                "Skipping large file: {:?} ({} bytes)",
                                path,
                                metadata.len()
                            );
                            continue;
                        }
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Skip hidden directories below the root
    fn should_process_entry(entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();

        // Never filter the root directory
        if path == root {
            return true;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with('.') && entry.file_type().is_dir() {
                return false;
            }
        }

        true
    }

    /// Match against the file name and the root-relative path
    fn matches_pattern(&self, path: &Path, root: &Path) -> bool {
        let by_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .map(|f| self.pattern.matches(f))
            .unwrap_or(false);

        by_name
            || path
                .strip_prefix(root)
                .map(|rel| self.pattern.matches_path(rel))
                .unwrap_or(false)
    }
}
