// Gene Pathway Ingest Pipeline
//
// One run, one connection, one transaction:
//
//   initialized -> schema-ready -> genes-loaded -> pathways-loaded
//               -> annotations-loaded -> committed
//
// Pathway documents that fail to parse are skipped. Any other failure drops
// the transaction before commit, so the database is left without partial
// rows and the run has to start over against a fresh file.

use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::gaf::extract_annotations;
use crate::kgml;
use crate::store::{self, Store};
use genepath_common::{GeneSet, PathwayEntry};
use rusqlite::Connection;
use tracing::{debug, info, info_span, warn};

/// Last stage a run completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadStage {
    Initialized,
    SchemaReady,
    GenesLoaded,
    PathwaysLoaded,
    AnnotationsLoaded,
    Committed,
}

impl std::fmt::Display for LoadStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LoadStage::Initialized => "initialized",
            LoadStage::SchemaReady => "schema-ready",
            LoadStage::GenesLoaded => "genes-loaded",
            LoadStage::PathwaysLoaded => "pathways-loaded",
            LoadStage::AnnotationsLoaded => "annotations-loaded",
            LoadStage::Committed => "committed",
        };
        f.write_str(name)
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Pathway documents configured
    pub documents: usize,
    /// Documents skipped because they could not be read or parsed
    pub documents_failed: usize,
    pub genes: usize,
    pub pathways: usize,
    pub annotations: usize,
    /// Annotation rows whose gene is not in the gene table
    pub orphan_annotations: usize,
    pub stage: LoadStage,
}

/// Pathway entries of every readable document plus the genes they name
#[derive(Debug, Default)]
pub struct ExtractedPathways {
    pub entries: Vec<PathwayEntry>,
    pub genes: GeneSet,
    pub documents_failed: usize,
}

/// Gene pathway ingestion pipeline
pub struct IngestPipeline {
    config: IngestConfig,
}

impl IngestPipeline {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Open the configured database, load everything, and close it.
    pub fn run(&self) -> Result<LoadReport> {
        let span = info_span!("ingest", database = %self.config.database_path.display());
        let _enter = span.enter();

        let mut store = Store::open(&self.config.database_path)?;
        let report = self.load_into(&mut store)?;
        store.close()?;

        info!(
            documents = report.documents,
            documents_failed = report.documents_failed,
            genes = report.genes,
            pathways = report.pathways,
            annotations = report.annotations,
            orphan_annotations = report.orphan_annotations,
            "Ingest committed"
        );

        Ok(report)
    }

    /// Load into an already open store inside a single transaction.
    ///
    /// On error the transaction is dropped uncommitted and rolls back.
    pub fn load_into(&self, store: &mut Store) -> Result<LoadReport> {
        let mut stage = LoadStage::Initialized;

        warn_if_populated(store.connection())?;

        let tx = store.transaction().map_err(IngestError::store(stage))?;

        store::create_tables(&tx).map_err(IngestError::store(stage))?;
        stage = advance(stage, LoadStage::SchemaReady);

        let extracted = self.extract_pathways()?;

        let genes =
            store::insert_genes(&tx, &extracted.genes).map_err(IngestError::store(stage))?;
        stage = advance(stage, LoadStage::GenesLoaded);

        let pathways =
            store::insert_pathways(&tx, &extracted.entries).map_err(IngestError::store(stage))?;
        stage = advance(stage, LoadStage::PathwaysLoaded);

        let annotations = extract_annotations(&self.config.annotation_path)?;
        let orphan_annotations = annotations
            .iter()
            .filter(|a| !extracted.genes.contains(&a.gene_id))
            .count();

        let annotations =
            store::insert_annotations(&tx, &annotations).map_err(IngestError::store(stage))?;
        stage = advance(stage, LoadStage::AnnotationsLoaded);

        if orphan_annotations > 0 {
            info!(
                orphan_annotations,
                "Loaded annotations for genes absent from every pathway document"
            );
        }

        tx.commit().map_err(IngestError::store(stage))?;
        stage = advance(stage, LoadStage::Committed);

        Ok(LoadReport {
            documents: self.config.pathways.len(),
            documents_failed: extracted.documents_failed,
            genes,
            pathways,
            annotations,
            orphan_annotations,
            stage,
        })
    }

    /// Parse every configured KGML document in order, accumulating the
    /// distinct gene set. Unreadable documents are skipped and counted.
    pub fn extract_pathways(&self) -> Result<ExtractedPathways> {
        let mut extracted = ExtractedPathways::default();

        for source in &self.config.pathways {
            let Some(entries) = kgml::read_or_skip(&source.path, source.disease)? else {
                extracted.documents_failed += 1;
                continue;
            };

            let new_genes = extracted.genes.extend_from_entries(&entries);
            debug!(
                path = %source.path.display(),
                entries = entries.len(),
                new_genes,
                "Accumulated pathway document"
            );
            extracted.entries.extend(entries);
        }

        info!(
            documents = self.config.pathways.len(),
            failed = extracted.documents_failed,
            entries = extracted.entries.len(),
            genes = extracted.genes.len(),
            "Extracted pathway entries"
        );

        Ok(extracted)
    }
}

fn advance(from: LoadStage, to: LoadStage) -> LoadStage {
    debug!(from = %from, to = %to, "Load stage complete");
    to
}

/// Gene inserts are idempotent but pathway and annotation inserts are not,
/// so loading into a populated database duplicates those rows.
fn warn_if_populated(conn: &Connection) -> Result<()> {
    let existing =
        store::stored_gene_count(conn).map_err(IngestError::store(LoadStage::Initialized))?;

    if existing > 0 {
        warn!(
            existing_genes = existing,
            "Database already holds genes; pathway and annotation rows will be duplicated"
        );
    }

    Ok(())
}
