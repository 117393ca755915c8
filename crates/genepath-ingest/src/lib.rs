//! Genepath Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Loads KEGG pathway membership and Gene Ontology annotations into a SQLite
//! gene database.
//!
//! # Data Sources
//!
//! - **KGML**: KEGG pathway maps, one document per disease
//! - **GAF**: GO annotation tables such as `goa_human.gaf`
//!
//! # Example
//!
//! ```no_run
//! use genepath_ingest::{IngestConfig, IngestPipeline};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::load(None)?;
//!     let report = IngestPipeline::new(config).run()?;
//!     println!("Loaded {} genes", report.genes);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gaf;
pub mod kgml;
pub mod pipeline;
pub mod store;

// Re-export commonly used types
pub use config::{IngestConfig, PathwaySource};
pub use error::{IngestError, Result};
pub use pipeline::{IngestPipeline, LoadReport, LoadStage};
