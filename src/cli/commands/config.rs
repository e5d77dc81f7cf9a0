//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;

/// Arguments for the config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Also show resolved XDG paths
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    pub model_cache: String,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub fn execute(args: ConfigArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let xdg = XdgDirs::new();
    let model_cache = config
        .embedding
        .cache_dir
        .clone()
        .unwrap_or_else(|| xdg.models_dir());

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        model_cache: model_cache.to_string_lossy().into_owned(),
        config,
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  loader:");
            println!("    data_dir: {}", config.loader.data_dir.display());
            println!("    glob: {}", config.loader.glob);
            println!("    recursive: {}", config.loader.recursive);
            println!("    max_file_size_mb: {}", config.loader.max_file_size_mb);
            println!("  chunking:");
            println!("    chunk_size: {}", config.chunking.chunk_size);
            println!("    overlap: {}", config.chunking.overlap);
            println!("  embedding:");
            println!("    backend: {}", config.embedding.backend);
            println!("    model_name: {}", config.embedding.model_name);
            println!("    revision: {}", config.embedding.revision);
            println!(
                "    max_sequence_length: {}",
                config.embedding.max_sequence_length
            );
            println!("    batch_size: {}", config.embedding.batch_size);
            println!("    normalize: {}", config.embedding.normalize);
            println!("  storage:");
            println!("    index_dir: {}", config.storage.index_dir.display());
            println!("    metric: {}", config.storage.metric);
            if args.all {
                println!("  paths:");
                println!("    config_file: {}", response.config_file);
                println!("    model_cache: {}", response.model_cache);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    // Printed first so an invalid value can be seen before the error
    config.validate()
}
