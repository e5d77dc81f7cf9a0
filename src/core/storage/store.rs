//! Persisted vector store.
//!
//! A store directory holds three files:
//!
//! ```text
//! {index_dir}/
//! ├── index.bin        # FlatIndex, binary
//! ├── docstore.json    # one entry per index position
//! └── meta.json        # StoreMetadata
//! ```
//!
//! Saving always rewrites all three files. Each is first written as
//! `<name>.new` next to the live file and only renamed into place once
//! all three are staged, so a failed save leaves the previous store
//! readable. Other files in the directory are left alone.

use crate::core::config::Metric;
use crate::core::error::{PdfMemError, Result};
use crate::core::storage::flat::FlatIndex;
use crate::core::types::Embedding;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.bin";
pub const DOCSTORE_FILE: &str = "docstore.json";
pub const META_FILE: &str = "meta.json";

const STAGING_SUFFIX: &str = "new";

/// Store layout version (bump on incompatible changes)
pub const SCHEMA_VERSION: u32 = 1;

/// Store metadata (Schema v1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMetadata {
    pub schema_version: u32,
    pub model_name: String,
    pub dimension: usize,
    pub metric: Metric,
    pub documents_count: usize,
    pub chunks_count: usize,
    pub chunk_size: usize,
    pub overlap: usize,
    pub source_dir: PathBuf,
    pub created_at: DateTime<Utc>,
}

/// Text and provenance of one indexed chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocstoreEntry {
    /// Position of the vector in the index
    pub position: usize,
    pub text: String,
    pub source: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    pub chunk_index: usize,
    pub start_char: usize,
    pub end_char: usize,
}

/// Search result
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub score: f32,
    pub entry: &'a DocstoreEntry,
}

/// Vector index plus docstore and metadata
#[derive(Debug, Clone)]
pub struct VectorStore {
    index: FlatIndex,
    docstore: Vec<DocstoreEntry>,
    metadata: StoreMetadata,
}

impl VectorStore {
    /// Build an in-memory store, one index entry per embedding
    ///
    /// `metadata.dimension` and `metadata.metric` define the index;
    /// `metadata.chunks_count` is set from the embeddings.
    pub fn from_embeddings(embeddings: Vec<Embedding>, mut metadata: StoreMetadata) -> Result<Self> {
        let mut index = FlatIndex::new(metadata.dimension, metadata.metric);
        let mut docstore = Vec::with_capacity(embeddings.len());

        for Embedding { vector, chunk } in embeddings {
            let position = index.add(&vector)?;
            docstore.push(DocstoreEntry {
                position,
                text: chunk.text,
                source: chunk.metadata.source,
                page: chunk.metadata.page,
                chunk_index: chunk.chunk_index,
                start_char: chunk.start_char,
                end_char: chunk.end_char,
            });
        }

        metadata.chunks_count = docstore.len();

        Ok(Self {
            index,
            docstore,
            metadata,
        })
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    pub fn docstore(&self) -> &[DocstoreEntry] {
        &self.docstore
    }

    pub fn metadata(&self) -> &StoreMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Write the store to `dir`, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| {
            PdfMemError::StorageError(format!("Cannot create index directory {dir:?}: {e}"))
        })?;

        let index = self.index.to_bytes();
        let docstore = serde_json::to_string_pretty(&self.docstore)?;
        let metadata = serde_json::to_string_pretty(&self.metadata)?;
        let files: [(&str, &[u8]); 3] = [
            (INDEX_FILE, index.as_slice()),
            (DOCSTORE_FILE, docstore.as_bytes()),
            (META_FILE, metadata.as_bytes()),
        ];

        let mut staged = Vec::with_capacity(files.len());
        for (name, contents) in files {
            let live = dir.join(name);
            let next = staging_path(&live);
            if let Err(e) = write_file(&next, contents) {
                discard_staged(&staged);
                return Err(e);
            }
            staged.push((next, live));
        }

        for (next, live) in &staged {
            fs::rename(next, live).map_err(|e| {
                PdfMemError::StorageError(format!("Cannot replace {live:?}: {e}"))
            })?;
        }

        tracing::info!(
            "Saved {} vectors ({} dims, {}) to {:?}",
            self.index.len(),
            self.index.dimension(),
            self.index.metric(),
            dir
        );
        Ok(())
    }

    /// Load a store previously written by [`VectorStore::save`]
    ///
    /// # Errors
    ///
    /// `StorageError` if a file is missing, unreadable, or the three
    /// files disagree on entry count or dimension.
    pub fn load(dir: &Path) -> Result<Self> {
        let metadata = read_metadata(dir)?;
        let docstore = read_docstore(dir)?;
        let index = read_index(dir)?;

        if index.len() != docstore.len() || index.len() != metadata.chunks_count {
            return Err(PdfMemError::StorageError(format!(
                "Inconsistent store {dir:?}: index has {} entries, docstore {}, metadata {}",
                index.len(),
                docstore.len(),
                metadata.chunks_count
            )));
        }
        if index.dimension() != metadata.dimension {
            return Err(PdfMemError::StorageError(format!(
                "Inconsistent store {dir:?}: index dimension {}, metadata dimension {}",
                index.dimension(),
                metadata.dimension
            )));
        }

        Ok(Self {
            index,
            docstore,
            metadata,
        })
    }

    /// The `k` entries closest to `query`, best first
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit<'_>>> {
        let neighbors = self.index.search(query, k)?;
        neighbors
            .into_iter()
            .map(|n| {
                self.docstore
                    .get(n.position)
                    .map(|entry| SearchHit {
                        score: n.score,
                        entry,
                    })
                    .ok_or_else(|| {
                        PdfMemError::StorageError(format!(
                            "Index position {} missing from docstore",
                            n.position
                        ))
                    })
            })
            .collect()
    }
}

pub(crate) fn read_metadata(dir: &Path) -> Result<StoreMetadata> {
    read_json(&dir.join(META_FILE))
}

pub(crate) fn read_docstore(dir: &Path) -> Result<Vec<DocstoreEntry>> {
    read_json(&dir.join(DOCSTORE_FILE))
}

pub(crate) fn read_index(dir: &Path) -> Result<FlatIndex> {
    let path = dir.join(INDEX_FILE);
    let bytes = fs::read(&path)
        .map_err(|e| PdfMemError::StorageError(format!("Cannot read {path:?}: {e}")))?;
    FlatIndex::from_bytes(&bytes)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| PdfMemError::StorageError(format!("Cannot read {path:?}: {e}")))?;
    serde_json::from_str(&contents)
        .map_err(|e| PdfMemError::StorageError(format!("Cannot parse {path:?}: {e}")))
}

fn staging_path(live: &Path) -> PathBuf {
    let mut name = live.as_os_str().to_owned();
    name.push(".");
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (next, _) in staged {
        if let Err(e) = fs::remove_file(next) {
            tracing::warn!("Cannot remove staged file {:?}: {}", next, e);
        }
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)
        .map_err(|e| PdfMemError::StorageError(format!("Cannot write {path:?}: {e}")))
}
