//! SQLite schema for the gene database

use rusqlite::Connection;

/// Tables owned by the loader
pub const TABLES: [&str; 3] = ["genes", "pathways", "gene_go_associations"];

/// Prepare a fresh connection for loading.
///
/// Gene references are soft: annotation rows may name genes that no pathway
/// document lists. The bundled SQLite build enforces foreign keys by
/// default, so enforcement is switched off here. The pragma is a no-op
/// inside a transaction and must run before one starts.
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", false)
}

/// Create the gene, pathway and annotation tables.
///
/// Safe to run against a database that already has them. The foreign keys
/// document the relationships; [`configure_connection`] leaves them
/// unenforced.
pub fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS genes (
            gene_id TEXT PRIMARY KEY
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS pathways (
            entry_id TEXT,
            gene_id TEXT,
            entry_type TEXT,
            disease TEXT,

            FOREIGN KEY (gene_id) REFERENCES genes(gene_id)
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS gene_go_associations (
            gene_id TEXT,
            go_id TEXT,

            FOREIGN KEY (gene_id) REFERENCES genes(gene_id)
        )
        "#,
        [],
    )?;

    Ok(())
}
