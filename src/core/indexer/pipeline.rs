//! Ingestion pipeline orchestration.
//!
//! Coordinates the end-to-end ingestion workflow:
//! 1. Load documents from the input directory
//! 2. Chunk document text
//! 3. Embed every chunk
//! 4. Build and persist the vector store
//!
//! Each stage finishes before the next begins. Any error aborts the
//! run; nothing is written unless every stage succeeds.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;

use crate::core::config::{validate_glob, Config, EmbeddingConfig, Metric};
use crate::core::embedding::{create_embedder, embed_chunks, Embedder};
use crate::core::error::Result;
use crate::core::indexer::loader::{DirectoryLoader, LoadedDocuments};
use crate::core::indexer::Chunker;
use crate::core::storage::{StoreMetadata, VectorStore, SCHEMA_VERSION};
use crate::core::types::IndexStats;

/// Everything one ingestion run needs
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub input_dir: PathBuf,
    pub glob: String,
    pub recursive: bool,
    pub max_file_size_mb: usize,
    pub output_dir: PathBuf,
    pub chunk_size: usize,
    pub overlap: usize,
    pub embedding: EmbeddingConfig,
    pub metric: Metric,
}

impl IngestOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            input_dir: config.loader.data_dir.clone(),
            glob: config.loader.glob.clone(),
            recursive: config.loader.recursive,
            max_file_size_mb: config.loader.max_file_size_mb,
            output_dir: config.storage.index_dir.clone(),
            chunk_size: config.chunking.chunk_size,
            overlap: config.chunking.overlap,
            embedding: config.embedding.clone(),
            metric: config.storage.metric,
        }
    }
}

impl IngestOptions {
    /// Check the values a run depends on
    ///
    /// Applies the same rules as [`Config::validate`], to the options
    /// after every override.
    pub fn validate(&self) -> Result<()> {
        validate_glob(&self.glob)?;
        Chunker::new(self.chunk_size, self.overlap)?;
        self.embedding.validate()
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Orchestrates the ingestion pipeline
#[derive(Debug)]
pub struct IngestPipeline<'a> {
    options: &'a IngestOptions,
    loader: DirectoryLoader,
    chunker: Chunker,
}

impl<'a> IngestPipeline<'a> {
    /// Validate options and prepare the stages
    ///
    /// Fails with `ConfigError` before touching any file.
    pub fn new(options: &'a IngestOptions) -> Result<Self> {
        options.validate()?;
        let chunker = Chunker::new(options.chunk_size, options.overlap)?;
        let loader = DirectoryLoader::new(
            &options.glob,
            options.recursive,
            options.max_file_size_mb,
        )?;

        Ok(Self {
            options,
            loader,
            chunker,
        })
    }

    /// Stage 1: load every matching document
    pub fn load(&self) -> Result<LoadedDocuments> {
        tracing::info!("Loading documents from {:?}", self.options.input_dir);
        let loaded = self.loader.load(&self.options.input_dir)?;
        tracing::info!(
            "Loaded {} documents from {} files",
            loaded.documents.len(),
            loaded.files.len()
        );
        Ok(loaded)
    }

    /// Stages 2-4: chunk, embed, and persist
    pub fn build(
        &self,
        loaded: LoadedDocuments,
        embedder: &dyn Embedder,
        start: Instant,
    ) -> Result<IndexStats> {
        let chunks = self.chunker.chunk_documents(&loaded.documents);
        let chunks_created = chunks.len();
        tracing::info!(
            "Split {} documents into {} chunks ({} chars, {} overlap)",
            loaded.documents.len(),
            chunks_created,
            self.chunker.chunk_size(),
            self.chunker.overlap()
        );

        tracing::info!(
            "Embedding {} chunks with {}",
            chunks_created,
            embedder.model_name()
        );
        let embeddings = embed_chunks(embedder, chunks, self.options.embedding.batch_size)?;

        let metadata = StoreMetadata {
            schema_version: SCHEMA_VERSION,
            model_name: embedder.model_name().to_string(),
            dimension: embedder.dimension(),
            metric: self.options.metric,
            documents_count: loaded.documents.len(),
            chunks_count: chunks_created,
            chunk_size: self.options.chunk_size,
            overlap: self.options.overlap,
            source_dir: self.options.input_dir.clone(),
            created_at: Utc::now(),
        };
        let store = VectorStore::from_embeddings(embeddings, metadata)?;
        store.save(&self.options.output_dir)?;

        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Ingestion complete: {} files, {} documents, {} chunks indexed in {}ms",
            loaded.files.len(),
            loaded.documents.len(),
            store.len(),
            duration_ms
        );

        Ok(IndexStats {
            files_loaded: loaded.files.len(),
            documents_loaded: loaded.documents.len(),
            chunks_created,
            vectors_indexed: store.len(),
            dimension: embedder.dimension(),
            model_name: embedder.model_name().to_string(),
            index_path: self.options.output_dir.clone(),
            duration_ms,
        })
    }
}

/// Run the whole pipeline with the configured embedding backend
///
/// Options are validated and documents loaded before the model is
/// loaded, so bad input fails without a model download.
pub fn build_vector_store(options: &IngestOptions) -> Result<IndexStats> {
    let start = Instant::now();
    let pipeline = IngestPipeline::new(options)?;
    let loaded = pipeline.load()?;
    let embedder = create_embedder(&options.embedding)?;
    pipeline.build(loaded, embedder.as_ref(), start)
}

/// Run the whole pipeline with an explicit embedder
pub fn build_vector_store_with(
    options: &IngestOptions,
    embedder: &dyn Embedder,
) -> Result<IndexStats> {
    let start = Instant::now();
    let pipeline = IngestPipeline::new(options)?;
    let loaded = pipeline.load()?;
    pipeline.build(loaded, embedder, start)
}
