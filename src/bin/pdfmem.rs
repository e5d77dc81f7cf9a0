//! pdfmem - build a semantic search index from a directory of PDFs
//!
//! # Examples
//!
//! ```bash
//! # Index every PDF in ./data into ./vectorstore/db_faiss
//! pdfmem ingest
//!
//! # Custom directories and chunking
//! pdfmem ingest --data-dir papers --output index --chunk-size 1000 --overlap 100
//!
//! # Check a saved index
//! pdfmem inspect vectorstore/db_faiss
//!
//! # Show configuration
//! pdfmem show-config
//! ```

use clap::Parser;
use pdfmem::cli::{run, Cli, LogFormat};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so stdout stays clean for command output
fn init_logging(verbose: bool, log_format: LogFormat) {
    let default_filter = if verbose { "pdfmem=debug" } else { "pdfmem=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let json = log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().compact().with_writer(std::io::stderr)))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    tracing::debug!("pdfmem {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
