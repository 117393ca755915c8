//! Error types for genepath ingestion
//!
//! Only [`IngestError::SourceUnreadable`] is recoverable: the pipeline logs it
//! and moves on to the next pathway document. Every other variant aborts the
//! run before the transaction commits.

use crate::gaf::GafError;
use crate::kgml::KgmlError;
use crate::pipeline::LoadStage;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// A KGML document could not be read or parsed
    #[error("Pathway document '{}' is unreadable: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: KgmlError,
    },

    /// The GAF table is missing or structurally malformed
    #[error("Annotation table '{}' is invalid: {source}", path.display())]
    AnnotationSourceInvalid {
        path: PathBuf,
        #[source]
        source: GafError,
    },

    /// A schema or insert statement failed
    #[error("Database write failed after stage '{stage}': {source}")]
    StoreWrite {
        stage: LoadStage,
        #[source]
        source: rusqlite::Error,
    },

    /// The database file could not be opened or closed cleanly
    #[error("Database '{}' could not be opened or closed: {source}", path.display())]
    StoreOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IngestError {
    pub fn config(msg: impl Into<String>) -> Self {
        IngestError::Config(msg.into())
    }

    pub(crate) fn store(stage: LoadStage) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| IngestError::StoreWrite { stage, source }
    }

    /// Whether the pipeline may continue past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, IngestError::SourceUnreadable { .. })
    }
}
