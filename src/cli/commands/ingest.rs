//! Ingest command - build the vector index from a document directory

use crate::cli::output::{format_elapsed, style, Report};
use crate::cli::OutputFormat;
use crate::core::config::{Config, EmbeddingBackend, Metric};
use crate::core::error::Result;
use crate::core::indexer::{build_vector_store, IngestOptions};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the ingest command
///
/// Every flag overrides the corresponding configuration value.
#[derive(Args, Debug, Default)]
pub struct IngestArgs {
    /// Directory containing the documents [default: data]
    #[arg(long, short = 'd')]
    pub data_dir: Option<PathBuf>,

    /// File filter, glob syntax [default: *.pdf]
    #[arg(long, short = 'g')]
    pub glob: Option<String>,

    /// Descend into subdirectories
    #[arg(long, short = 'r', overrides_with = "no_recursive")]
    pub recursive: bool,

    /// Only read the top level of the data directory
    #[arg(long, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// Directory the index is written to [default: vectorstore/db_faiss]
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Characters per chunk [default: 800]
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Characters shared by consecutive chunks [default: 200]
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Embedding model (Hugging Face id or local directory)
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Embedding backend
    #[arg(long, value_enum)]
    pub backend: Option<EmbeddingBackend>,

    /// Index distance metric
    #[arg(long, value_enum)]
    pub metric: Option<Metric>,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl IngestArgs {
    /// Pipeline options: configuration with flag overrides applied
    pub fn to_options(&self, config: &Config) -> IngestOptions {
        let mut options = IngestOptions::from_config(config);

        if let Some(dir) = &self.data_dir {
            options.input_dir = dir.clone();
        }
        if let Some(glob) = &self.glob {
            options.glob = glob.clone();
        }
        if self.recursive {
            options.recursive = true;
        } else if self.no_recursive {
            options.recursive = false;
        }
        if let Some(output) = &self.output {
            options.output_dir = output.clone();
        }
        if let Some(chunk_size) = self.chunk_size {
            options.chunk_size = chunk_size;
        }
        if let Some(overlap) = self.overlap {
            options.overlap = overlap;
        }
        if let Some(model) = &self.model {
            options.embedding.model_name = model.clone();
        }
        if let Some(backend) = self.backend {
            options.embedding.backend = backend;
        }
        if let Some(metric) = self.metric {
            options.metric = metric;
        }

        options
    }
}

/// Ingestion result response
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub data_dir: String,
    pub index_dir: String,
    pub files_loaded: usize,
    pub documents_loaded: usize,
    pub chunks_created: usize,
    pub vectors_indexed: usize,
    pub dimension: usize,
    pub model: String,
    pub metric: Metric,
    pub duration_ms: u64,
}

impl IngestResponse {
    /// Human summary of a finished run
    pub fn render_human(&self) -> String {
        let mut report = Report::new(format!("{} {}", style::good("Indexed"), self.index_dir));
        report
            .field(
                "Input",
                format!(
                    "{} files, {} documents from {}",
                    style::count(self.files_loaded),
                    style::count(self.documents_loaded),
                    self.data_dir
                ),
            )
            .field(
                "Vectors",
                format!(
                    "{} chunks -> {} vectors",
                    style::count(self.chunks_created),
                    style::count(self.vectors_indexed)
                ),
            )
            .field(
                "Model",
                format!("{} ({} dims, {})", self.model, self.dimension, self.metric),
            )
            .field("Took", style::count(format_elapsed(self.duration_ms)));
        report.to_string()
    }
}

/// Execute the ingest command
pub fn execute(args: IngestArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let options = args.to_options(config);

    if !args.quiet && format == OutputFormat::Human {
        eprintln!(
            "Ingesting {} from {}...",
            style::muted(&options.glob),
            style::path(&options.input_dir)
        );
    }

    let stats = build_vector_store(&options)?;

    let response = IngestResponse {
        data_dir: options.input_dir.to_string_lossy().into_owned(),
        index_dir: stats.index_path.to_string_lossy().into_owned(),
        files_loaded: stats.files_loaded,
        documents_loaded: stats.documents_loaded,
        chunks_created: stats.chunks_created,
        vectors_indexed: stats.vectors_indexed,
        dimension: stats.dimension,
        model: stats.model_name,
        metric: options.metric,
        duration_ms: stats.duration_ms,
    };

    match format {
        OutputFormat::Human => println!("{}", response.render_human()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}
