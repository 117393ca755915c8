//! Genepath Ingest - load pathway and GO annotation data into SQLite

use anyhow::{Context, Result};
use clap::Parser;
use genepath_common::logging::{init_logging, LogConfig, LogLevel};
use genepath_ingest::{IngestConfig, IngestPipeline};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "genepath-ingest")]
#[command(author, version, about = "Load KEGG pathway entries and GO annotations into SQLite")]
struct Cli {
    /// TOML file listing the database, annotation table and pathway documents
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite database to create (overrides the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// GAF annotation table (overrides the config file)
    #[arg(short, long)]
    annotations: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the flag
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("genepath-ingest")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    let mut config =
        IngestConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(database) = cli.database {
        config.database_path = database;
    }
    if let Some(annotations) = cli.annotations {
        config.annotation_path = annotations;
    }
    config.validate()?;

    let pipeline = IngestPipeline::new(config);
    let config = pipeline.config();

    info!(
        database = %config.database_path.display(),
        annotations = %config.annotation_path.display(),
        documents = config.pathways.len(),
        "Starting ingest"
    );

    let report = pipeline.run()?;

    info!(
        genes = report.genes,
        pathways = report.pathways,
        annotations = report.annotations,
        skipped_documents = report.documents_failed,
        "Ingestion complete"
    );

    Ok(())
}
