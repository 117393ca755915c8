// Gene Ontology Annotation File (GAF) Extraction
//
// GAF 2.x is a headerless, tab-delimited table with 17 columns per row and
// `!`-prefixed comment lines (the `!gaf-version: 2.2` header included).
// Only the gene symbol (column 3) and GO term id (column 5) are loaded.
//
// Reference: https://geneontology.org/docs/go-annotation-file-gaf-format-2.2/

pub mod models;
pub mod parser;

pub use models::{GafRecord, GAF_COLUMN_COUNT};
pub use parser::{extract_annotations, parse_gaf, GafStats};

/// Error types for GAF extraction
#[derive(Debug, thiserror::Error)]
pub enum GafError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: expected {expected} tab-separated columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },
}
