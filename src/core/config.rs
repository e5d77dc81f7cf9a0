//! Configuration management for pdfmem.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with defaults matching the classic
//! "PDFs in data/, index in vectorstore/db_faiss" layout.

use crate::core::error::{PdfMemError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Document loading configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoaderConfig {
    /// Directory containing the source documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// File filter (glob syntax), e.g. "*.pdf"
    #[serde(default = "default_glob")]
    pub glob: String,

    /// Descend into subdirectories
    #[serde(default)]
    pub recursive: bool,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Characters per chunk (not bytes!)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Character overlap between consecutive chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

/// Embedding backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Pretrained BERT sentence-embedding model (candle)
    Bert,
    /// Offline character-trigram hashing embedder
    Hashing,
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingBackend::Bert => write!(f, "bert"),
            EmbeddingBackend::Hashing => write!(f, "hashing"),
        }
    }
}

impl FromStr for EmbeddingBackend {
    type Err = PdfMemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bert" => Ok(EmbeddingBackend::Bert),
            "hashing" => Ok(EmbeddingBackend::Hashing),
            other => Err(PdfMemError::ConfigError(format!(
                "Unknown embedding backend '{other}' (expected 'bert' or 'hashing')"
            ))),
        }
    }
}

/// Embedding model configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    #[serde(default = "default_backend")]
    pub backend: EmbeddingBackend,

    /// Hugging Face model id, or a local directory with the model files
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Model revision (branch, tag or commit)
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Tokens beyond this length are truncated
    #[serde(default = "default_max_sequence_length")]
    pub max_sequence_length: usize,

    /// Chunks embedded per forward pass
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// L2-normalize output vectors
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    /// Vector length of the hashing backend
    #[serde(default = "default_hashing_dimension")]
    pub hashing_dimension: usize,

    /// Model download cache (defaults to the XDG cache directory)
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

/// Distance metric of the vector index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Squared Euclidean distance (smaller is closer)
    L2,
    /// Cosine similarity (larger is closer)
    Cosine,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::L2 => write!(f, "l2"),
            Metric::Cosine => write!(f, "cosine"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory the vector store is written to
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    #[serde(default = "default_metric")]
    pub metric: Metric,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_glob() -> String {
    "*.pdf".to_string()
}

fn default_max_file_size() -> usize {
    100
}

fn default_chunk_size() -> usize {
    800
}

fn default_overlap() -> usize {
    200
}

fn default_backend() -> EmbeddingBackend {
    EmbeddingBackend::Bert
}

fn default_model_name() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_max_sequence_length() -> usize {
    256
}

fn default_batch_size() -> usize {
    32
}

fn default_normalize() -> bool {
    true
}

fn default_hashing_dimension() -> usize {
    384
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("vectorstore/db_faiss")
}

fn default_metric() -> Metric {
    Metric::L2
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            glob: default_glob(),
            recursive: false,
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            model_name: default_model_name(),
            revision: default_revision(),
            max_sequence_length: default_max_sequence_length(),
            batch_size: default_batch_size(),
            normalize: default_normalize(),
            hashing_dimension: default_hashing_dimension(),
            cache_dir: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
            metric: default_metric(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| PdfMemError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load and validate config with explicit XDG directories
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let config = Self::resolve_with_xdg(xdg)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge TOML and env vars over the defaults without validating
    ///
    /// For callers that apply further overrides (CLI flags) and
    /// validate the final values themselves.
    pub fn resolve() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::resolve_with_xdg(&xdg)
    }

    /// Merge configuration sources with explicit XDG directories
    ///
    /// Priority order:
    /// 1. PDFMEM_CONFIG env var
    /// 2. XDG config file (~/.config/pdfmem/config.toml)
    /// 3. ./pdfmem.toml
    /// 4. Defaults
    pub fn resolve_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let xdg_config = xdg.config_file();
        let mut config = if xdg_config.exists() {
            Self::from_file(xdg_config)?
        } else if env::var("PDFMEM_CONFIG").is_ok() {
            return Err(PdfMemError::ConfigError(format!(
                "Config file {xdg_config:?} does not exist"
            )));
        } else if Path::new("pdfmem.toml").exists() {
            Self::from_file("pdfmem.toml")?
        } else {
            Self::default()
        };

        config.merge_env()?;
        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(dir) = env::var("PDFMEM_DATA_DIR") {
            self.loader.data_dir = PathBuf::from(dir);
        }
        if let Ok(glob) = env::var("PDFMEM_GLOB") {
            self.loader.glob = glob;
        }

        if let Ok(chunk_size) = env::var("PDFMEM_CHUNK_SIZE") {
            if let Ok(size) = chunk_size.parse() {
                self.chunking.chunk_size = size;
            }
        }
        if let Ok(overlap) = env::var("PDFMEM_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.chunking.overlap = o;
            }
        }

        if let Ok(backend) = env::var("PDFMEM_EMBEDDING_BACKEND") {
            self.embedding.backend = backend.parse()?;
        }
        if let Ok(model) = env::var("PDFMEM_MODEL") {
            self.embedding.model_name = model;
        }
        if let Ok(batch_size) = env::var("PDFMEM_BATCH_SIZE") {
            if let Ok(size) = batch_size.parse() {
                self.embedding.batch_size = size;
            }
        }
        if let Ok(cache_dir) = env::var("PDFMEM_MODEL_CACHE_DIR") {
            self.embedding.cache_dir = Some(PathBuf::from(cache_dir));
        }

        if let Ok(index_dir) = env::var("PDFMEM_INDEX_DIR") {
            self.storage.index_dir = PathBuf::from(index_dir);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_glob(&self.loader.glob)?;
        self.chunking.validate()?;
        self.embedding.validate()
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Data dir: {:?}", self.loader.data_dir);
        tracing::info!("  Glob: {}", self.loader.glob);
        tracing::info!("  Recursive: {}", self.loader.recursive);
        tracing::info!("  Chunk size: {} chars", self.chunking.chunk_size);
        tracing::info!("  Overlap: {} chars", self.chunking.overlap);
        tracing::info!("  Embedding backend: {}", self.embedding.backend);
        tracing::info!("  Model: {}", self.embedding.model_name);
        tracing::info!("  Batch size: {}", self.embedding.batch_size);
        tracing::info!("  Index dir: {:?}", self.storage.index_dir);
        tracing::info!("  Metric: {}", self.storage.metric);
    }
}

/// Reject an empty file glob
pub fn validate_glob(glob: &str) -> Result<()> {
    if glob.trim().is_empty() {
        return Err(PdfMemError::ConfigError(
            "File glob must not be empty".to_string(),
        ));
    }
    Ok(())
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(PdfMemError::ConfigError(
                "Chunk size must be non-zero".to_string(),
            ));
        }

        if self.overlap >= self.chunk_size {
            return Err(PdfMemError::ConfigError(format!(
                "Overlap ({}) must be less than chunk size ({})",
                self.overlap, self.chunk_size
            )));
        }

        Ok(())
    }
}

impl EmbeddingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            return Err(PdfMemError::ConfigError(
                "Model name must not be empty".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(PdfMemError::ConfigError(
                "Batch size must be non-zero".to_string(),
            ));
        }

        if self.max_sequence_length == 0 {
            return Err(PdfMemError::ConfigError(
                "Max sequence length must be non-zero".to_string(),
            ));
        }

        if self.hashing_dimension == 0 {
            return Err(PdfMemError::ConfigError(
                "Hashing dimension must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
