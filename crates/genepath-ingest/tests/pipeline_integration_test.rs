//! Integration tests for the ingest pipeline
//!
//! Each test builds a configuration over the fixture documents in
//! `tests/fixtures/`, runs the pipeline against a temporary SQLite file, and
//! inspects the resulting tables directly.

use genepath_common::Disease;
use genepath_ingest::store::Store;
use genepath_ingest::{IngestConfig, IngestError, IngestPipeline, LoadStage, PathwaySource};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

fn config_for(dir: &TempDir, pathways: Vec<PathwaySource>, annotations: &str) -> IngestConfig {
    IngestConfig {
        database_path: dir.path().join("gene_pathway_db.sqlite"),
        annotation_path: fixture_path(annotations),
        pathways,
    }
}

fn default_sources() -> Vec<PathwaySource> {
    vec![
        PathwaySource::new(fixture_path("kgml/hsa05010_mini.xml"), Disease::Alzheimers),
        PathwaySource::new(fixture_path("kgml/hsa05210_mini.xml"), Disease::ColorectalCancer),
    ]
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .unwrap()
}

fn table_count(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
        [],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn test_full_ingest() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    let report = IngestPipeline::new(config).run().unwrap();

    assert_eq!(report.stage, LoadStage::Committed);
    assert_eq!(report.documents, 2);
    assert_eq!(report.documents_failed, 0);
    // APP, TP53, PSEN1, BRCA1, APC, path:hsa04110
    assert_eq!(report.genes, 6);
    assert_eq!(report.pathways, 7);
    // TP53/GO:0006915 appears twice in the table
    assert_eq!(report.annotations, 4);
    // INS is in no pathway document
    assert_eq!(report.orphan_annotations, 1);

    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(count(&conn, "genes"), 6);
    assert_eq!(count(&conn, "pathways"), 7);
    assert_eq!(count(&conn, "gene_go_associations"), 4);
}

#[test]
fn test_multi_gene_entry_expands_per_gene() {
    let dir = TempDir::new().unwrap();
    let sources = vec![PathwaySource::new(
        fixture_path("kgml/hsa05210_mini.xml"),
        Disease::ColorectalCancer,
    )];
    let config = config_for(&dir, sources, "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    IngestPipeline::new(config).run().unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT gene_id, entry_type, disease FROM pathways WHERE entry_id = '10' ORDER BY gene_id")
        .unwrap();
    let rows: Vec<(String, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        rows,
        vec![
            ("BRCA1".to_string(), "gene".to_string(), "Colorectal cancer".to_string()),
            ("TP53".to_string(), "gene".to_string(), "Colorectal cancer".to_string()),
        ]
    );
}

#[test]
fn test_disease_column_holds_labels() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    IngestPipeline::new(config).run().unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT DISTINCT disease FROM pathways ORDER BY disease")
        .unwrap();
    let diseases: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(diseases, vec!["Alzheimer's disease", "Colorectal cancer"]);
}

#[test]
fn test_gene_shared_across_documents_stored_once() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    IngestPipeline::new(config).run().unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let tp53_genes: i64 = conn
        .query_row("SELECT COUNT(*) FROM genes WHERE gene_id = 'TP53'", [], |row| row.get(0))
        .unwrap();
    let tp53_pathways: i64 = conn
        .query_row("SELECT COUNT(*) FROM pathways WHERE gene_id = 'TP53'", [], |row| row.get(0))
        .unwrap();

    assert_eq!(tp53_genes, 1);
    assert_eq!(tp53_pathways, 2);
}

#[test]
fn test_duplicate_annotation_pairs_collapse() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    IngestPipeline::new(config).run().unwrap();

    let conn = Connection::open(&db_path).unwrap();
    let pairs: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM gene_go_associations WHERE gene_id = 'TP53' AND go_id = 'GO:0006915'",
            [],
            |row| row.get(0),
        )
        .unwrap();

    assert_eq!(pairs, 1);
}

#[test]
fn test_unreadable_documents_are_skipped() {
    let dir = TempDir::new().unwrap();
    let sources = vec![
        PathwaySource::new(fixture_path("kgml/malformed.xml"), Disease::TypeIIDiabetes),
        PathwaySource::new(fixture_path("kgml/does_not_exist.xml"), Disease::Parkinsons),
        PathwaySource::new(fixture_path("kgml/hsa05210_mini.xml"), Disease::ColorectalCancer),
    ];
    let config = config_for(&dir, sources, "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    let report = IngestPipeline::new(config).run().unwrap();

    assert_eq!(report.stage, LoadStage::Committed);
    assert_eq!(report.documents, 3);
    assert_eq!(report.documents_failed, 2);
    assert_eq!(report.pathways, 4);

    let conn = Connection::open(&db_path).unwrap();
    let diabetes_rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pathways WHERE disease = 'Type II diabetes mellitus'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(diabetes_rows, 0);
}

#[test]
fn test_document_with_content_after_root_is_skipped() {
    let dir = TempDir::new().unwrap();
    let sources = vec![
        PathwaySource::new(fixture_path("kgml/trailing_content.xml"), Disease::Parkinsons),
        PathwaySource::new(fixture_path("kgml/hsa05010_mini.xml"), Disease::Alzheimers),
    ];
    let config = config_for(&dir, sources, "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    let report = IngestPipeline::new(config).run().unwrap();

    assert_eq!(report.documents_failed, 1);
    assert_eq!(report.pathways, 3);

    let conn = Connection::open(&db_path).unwrap();
    let snca: i64 = conn
        .query_row("SELECT COUNT(*) FROM genes WHERE gene_id = 'SNCA'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(snca, 0);
}

#[test]
fn test_orphan_annotations_commit_through_opened_store() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    let report = IngestPipeline::new(config).run().unwrap();
    assert_eq!(report.orphan_annotations, 1);

    let conn = Connection::open(&db_path).unwrap();
    let orphans: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM gene_go_associations a
             WHERE NOT EXISTS (SELECT 1 FROM genes g WHERE g.gene_id = a.gene_id)",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 1);
}

#[test]
fn test_empty_pathway_document() {
    let dir = TempDir::new().unwrap();
    let sources = vec![PathwaySource::new(
        fixture_path("kgml/empty.xml"),
        Disease::Parkinsons,
    )];
    let config = config_for(&dir, sources, "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();

    let report = IngestPipeline::new(config).run().unwrap();

    assert_eq!(report.documents_failed, 0);
    assert_eq!(report.genes, 0);
    assert_eq!(report.pathways, 0);
    // Annotations load regardless of pathway membership
    assert_eq!(report.annotations, 4);
    assert_eq!(report.orphan_annotations, 4);

    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(table_count(&conn), 3);
    assert_eq!(count(&conn, "genes"), 0);
    assert_eq!(count(&conn, "gene_go_associations"), 4);
}

#[test]
fn test_malformed_annotation_table_rolls_back() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/bad_columns.gaf");
    let db_path = config.database_path.clone();

    let result = IngestPipeline::new(config).run();

    match result {
        Err(IngestError::AnnotationSourceInvalid { path, .. }) => {
            assert_eq!(path, fixture_path("gaf/bad_columns.gaf"));
        },
        other => panic!("Expected AnnotationSourceInvalid, got {:?}", other),
    }

    // Schema creation happened inside the dropped transaction
    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(table_count(&conn), 0);
}

#[test]
fn test_missing_annotation_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/missing.gaf");

    let err = IngestPipeline::new(config).run().unwrap_err();

    assert!(matches!(err, IngestError::AnnotationSourceInvalid { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_rerun_keeps_genes_and_duplicates_rows() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/goa_mini.gaf");
    let db_path = config.database_path.clone();
    let pipeline = IngestPipeline::new(config);

    let first = pipeline.run().unwrap();
    let second = pipeline.run().unwrap();

    assert_eq!(first.genes, 6);
    assert_eq!(second.genes, 0);
    assert_eq!(second.pathways, first.pathways);

    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(count(&conn, "genes"), 6);
    assert_eq!(count(&conn, "pathways"), 14);
    assert_eq!(count(&conn, "gene_go_associations"), 8);
}

#[test]
fn test_load_into_in_memory_store() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, default_sources(), "gaf/goa_mini.gaf");
    let pipeline = IngestPipeline::new(config);

    let mut store = Store::open_in_memory().unwrap();
    let report = pipeline.load_into(&mut store).unwrap();

    assert_eq!(report.stage, LoadStage::Committed);
    assert_eq!(count(store.connection(), "genes"), 6);
    assert!(!dir.path().join("gene_pathway_db.sqlite").exists());
}

#[test]
fn test_database_parent_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir, default_sources(), "gaf/goa_mini.gaf");
    config.database_path = dir.path().join("nested/out/genes.sqlite");

    IngestPipeline::new(config).run().unwrap();

    assert!(dir.path().join("nested/out/genes.sqlite").exists());
}
