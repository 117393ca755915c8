//! Relational store for genes, pathway entries and GO annotations
//!
//! The store wraps the single SQLite connection a run holds from open to
//! close. Write helpers take a plain `&Connection` so they run unchanged
//! inside the run's transaction (which derefs to one).

pub mod schema;

pub use schema::{configure_connection, create_tables};

use crate::error::{IngestError, Result};
use genepath_common::{GeneAnnotation, GeneSet, PathwayEntry};
use rusqlite::{params, Connection, Transaction};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Owner of the run's database connection
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Open (creating if needed) the SQLite database at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .and_then(|conn| configure_connection(&conn).map(|()| conn))
            .map_err(|source| IngestError::StoreOpen {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), "Opened gene database");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory()
            .and_then(|conn| configure_connection(&conn).map(|()| conn))
            .map_err(|source| IngestError::StoreOpen {
                path: path.clone(),
                source,
            })?;

        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Start the run's transaction. Dropping it without commit rolls back.
    pub fn transaction(&mut self) -> rusqlite::Result<Transaction<'_>> {
        self.conn.transaction()
    }

    /// Close the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, source)| IngestError::StoreOpen { path, source })
    }
}

/// Insert every gene of the set, ignoring ids already present.
///
/// Returns the number of rows actually added.
pub fn insert_genes(conn: &Connection, genes: &GeneSet) -> rusqlite::Result<usize> {
    let mut stmt = conn.prepare_cached("INSERT OR IGNORE INTO genes (gene_id) VALUES (?1)")?;

    let mut inserted = 0;
    for gene_id in genes.iter() {
        inserted += stmt.execute([gene_id])?;
    }

    Ok(inserted)
}

/// Insert pathway rows unconditionally
pub fn insert_pathways(conn: &Connection, entries: &[PathwayEntry]) -> rusqlite::Result<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO pathways (entry_id, gene_id, entry_type, disease) VALUES (?1, ?2, ?3, ?4)",
    )?;

    let mut inserted = 0;
    for entry in entries {
        inserted += stmt.execute(params![
            entry.entry_id,
            entry.gene_id,
            entry.entry_type,
            entry.disease.label(),
        ])?;
    }

    Ok(inserted)
}

/// Insert annotation rows unconditionally.
///
/// Callers pass already-deduplicated pairs; the table has no uniqueness
/// constraint of its own.
pub fn insert_annotations(
    conn: &Connection,
    annotations: &[GeneAnnotation],
) -> rusqlite::Result<usize> {
    let mut stmt =
        conn.prepare_cached("INSERT INTO gene_go_associations (gene_id, go_id) VALUES (?1, ?2)")?;

    let mut inserted = 0;
    for annotation in annotations {
        inserted += stmt.execute(params![annotation.gene_id, annotation.go_id])?;
    }

    Ok(inserted)
}

/// Number of genes already stored, or zero when the table does not exist yet
pub fn stored_gene_count(conn: &Connection) -> rusqlite::Result<i64> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'genes')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    conn.query_row("SELECT COUNT(*) FROM genes", [], |row| row.get(0))
}
