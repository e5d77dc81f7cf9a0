//! XDG Base Directory Support
//!
//! Resolves where pdfmem looks for its config file and where the
//! embedding model cache lives.

use std::env;
use std::fs;
use std::path::PathBuf;

/// XDG directory structure for pdfmem
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit PDFMEM_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.cache)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
            cache_dir: Self::resolve_cache_dir(),
        }
    }

    /// Resolve config directory
    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("PDFMEM_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("pdfmem");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pdfmem")
    }

    /// Resolve cache directory
    fn resolve_cache_dir() -> PathBuf {
        if let Ok(dir) = env::var("PDFMEM_CACHE_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CACHE_HOME") {
            return PathBuf::from(xdg).join("pdfmem");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cache")
            .join("pdfmem")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        // Explicit override
        if let Ok(file) = env::var("PDFMEM_CONFIG") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Directory where downloaded model artifacts are cached
    pub fn models_dir(&self) -> PathBuf {
        self.cache_dir.join("models")
    }

    /// Create the model cache directory if it doesn't exist
    pub fn ensure_models_dir(&self) -> std::io::Result<PathBuf> {
        let dir = self.models_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  Cache: {:?}", self.cache_dir);
        tracing::debug!("  Config file: {:?}", self.config_file());
        tracing::debug!("  Models: {:?}", self.models_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
