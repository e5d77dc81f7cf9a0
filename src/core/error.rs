//! Error types and error handling for pdfmem.
//!
//! Every pipeline stage returns [`Result`]. Errors are fatal: they
//! propagate to the binary, which prints the message and exits with
//! the code from [`PdfMemError::exit_code`].

use thiserror::Error;

/// Result type alias for pdfmem operations
pub type Result<T> = std::result::Result<T, PdfMemError>;

/// Main error type for the ingestion pipeline
#[derive(Error, Debug)]
pub enum PdfMemError {
    #[error("No documents found: {0}")]
    NoDocuments(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Model load error: {0}")]
    ModelLoadError(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl PdfMemError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error (missing input)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PdfMemError::NoDocuments(_) | PdfMemError::InvalidPath(_)
        )
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            PdfMemError::ConfigError(_) | PdfMemError::TomlError(_)
        )
    }

    /// Check if the embedding model could not be loaded
    pub fn is_model_load(&self) -> bool {
        matches!(self, PdfMemError::ModelLoadError(_))
    }

    /// Check if this is a storage error (index not writable/readable)
    pub fn is_storage(&self) -> bool {
        matches!(self, PdfMemError::StorageError(_))
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_config() {
            2
        } else if self.is_not_found() {
            3
        } else if self.is_model_load() {
            4
        } else if self.is_storage() {
            5
        } else {
            1
        }
    }
}
