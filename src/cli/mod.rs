//! CLI adapter for pdfmem
//!
//! Provides the command-line interface over the ingestion pipeline.
//! Depends on `core/`; `core/` never depends on this module.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     core/        |
//! |  (domain logic)  |
//! +--------+---------+
//!          |
//!          v
//! +------------------+
//! |      cli/        |
//! | (clap adapter)   |
//! +------------------+
//! ```

pub mod commands;
pub mod output;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::xdg::XdgDirs;
use clap::{Parser, Subcommand};

/// pdfmem - build a semantic search index from PDFs
///
/// Loads every PDF in a directory, splits the text into overlapping
/// chunks, embeds each chunk and writes a vector index to disk.
#[derive(Parser, Debug)]
#[command(name = "pdfmem")]
#[command(version)]
#[command(about = "Build a vector index from a directory of PDFs", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, chunk and embed documents, then write the vector index
    Ingest(commands::IngestArgs),

    /// Show metadata and a consistency report for a saved index
    Inspect(commands::InspectArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  pdfmem completions bash > ~/.local/share/bash-completion/completions/pdfmem
    ///   zsh:   pdfmem completions zsh > ~/.zfunc/_pdfmem
    ///   fish:  pdfmem completions fish > ~/.config/fish/completions/pdfmem.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<()> {
    // Completions don't need configuration
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    XdgDirs::new().log_paths();

    // Flags still apply on top, so validation waits for the final values
    let config = Config::resolve()?;
    config.log_config();

    match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args, &config, cli.format),
        Commands::Inspect(args) => commands::inspect::execute(args, &config, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &config, cli.format),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
