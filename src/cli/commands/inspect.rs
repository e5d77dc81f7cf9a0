//! Inspect command - show metadata and consistency of a saved index

use crate::cli::output::{format_age, format_size, style, Report};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::{PdfMemError, Result};
use crate::core::storage::{StoreValidator, ValidationReport};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args, Debug, Default)]
pub struct InspectArgs {
    /// Index directory [default: configured index_dir]
    pub dir: Option<PathBuf>,
}

/// Human view of a validated store
pub fn render_human(report: &ValidationReport) -> String {
    let meta = &report.metadata;
    let mut out = Report::new(format!("Index: {}", style::path(&report.index_dir)));
    out.field("Model", &meta.model_name)
        .field(
            "Dimension",
            format!("{} ({})", style::count(meta.dimension), meta.metric),
        )
        .field(
            "Contents",
            format!(
                "{} documents, {} chunks",
                style::count(meta.documents_count),
                style::count(meta.chunks_count)
            ),
        )
        .field(
            "Chunking",
            format!("{} chars, {} overlap", meta.chunk_size, meta.overlap),
        )
        .field("Source", style::path(&meta.source_dir))
        .field(
            "Created",
            format!(
                "{} ({})",
                meta.created_at.to_rfc3339(),
                style::muted(&format_age(meta.created_at, Utc::now()))
            ),
        )
        .field("Size", style::count(format_size(report.size_bytes)))
        .field(
            "Entries",
            format!(
                "index={} docstore={} metadata={}",
                report.index_entries, report.docstore_entries, meta.chunks_count
            ),
        );

    if report.is_consistent {
        out.field("Status", style::good("consistent"));
    } else {
        out.field("Status", style::bad("inconsistent"));
        for problem in problems(report) {
            out.line(format!("- {problem}"));
        }
    }
    out.to_string()
}

fn problems(report: &ValidationReport) -> Vec<String> {
    let mut problems = Vec::new();
    if !report.counts_match {
        problems.push(format!(
            "entry counts differ: index={}, docstore={}, metadata={}",
            report.index_entries, report.docstore_entries, report.metadata.chunks_count
        ));
    }
    if !report.dimension_matches {
        problems.push(format!(
            "dimension {} in index, {} in metadata",
            report.index_dimension, report.metadata.dimension
        ));
    }
    if !report.positions_ordered {
        problems.push("docstore positions out of order".to_string());
    }
    problems
}

/// Execute the inspect command
///
/// Fails with `StorageError` if the store is unreadable or its files
/// disagree. An inconsistent store still gets its report printed.
pub fn execute(args: InspectArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let dir = args
        .dir
        .unwrap_or_else(|| config.storage.index_dir.clone());

    let report = StoreValidator::new(&dir).validate()?;

    match format {
        OutputFormat::Human => println!("{}", render_human(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if !report.is_consistent {
        return Err(PdfMemError::StorageError(format!(
            "Index {dir:?} is inconsistent: {}",
            problems(&report).join("; ")
        )));
    }

    Ok(())
}
