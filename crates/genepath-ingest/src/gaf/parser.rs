// GAF Parser

use crate::error::{IngestError, Result};
use crate::gaf::{GafError, GafRecord, GAF_COLUMN_COUNT};
use genepath_common::GeneAnnotation;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// Counters for one parse
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GafStats {
    pub rows: usize,
    pub duplicates: usize,
}

/// Parse a GAF table into distinct (gene symbol, GO id) pairs.
///
/// Comment and blank lines are skipped. Any data row without exactly
/// [`GAF_COLUMN_COUNT`] columns fails the whole parse; there is no partial
/// result. Pairs keep the order in which they first appear.
pub fn parse_gaf<R: Read>(reader: R) -> std::result::Result<Vec<GeneAnnotation>, GafError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'!'))
        // Column counts are checked per row below to report the line number
        .flexible(true)
        // GAF has no quoting; a stray `"` in a name column is literal text
        .quoting(false)
        .from_reader(reader);

    let mut annotations = Vec::new();
    let mut seen: HashSet<GeneAnnotation> = HashSet::new();
    let mut stats = GafStats::default();
    let mut record = csv::StringRecord::new();

    while csv_reader.read_record(&mut record)? {
        if record.len() != GAF_COLUMN_COUNT {
            return Err(GafError::ColumnCount {
                line: record.position().map_or(0, |pos| pos.line()),
                expected: GAF_COLUMN_COUNT,
                found: record.len(),
            });
        }

        stats.rows += 1;

        let row: GafRecord = record.deserialize(None)?;
        let annotation = row.to_annotation();

        if seen.insert(annotation.clone()) {
            annotations.push(annotation);
        } else {
            stats.duplicates += 1;
        }
    }

    info!(
        rows = stats.rows,
        duplicates = stats.duplicates,
        annotations = annotations.len(),
        "Parsed GAF table"
    );

    Ok(annotations)
}

/// Open and parse the GAF table at `path`.
///
/// Any failure is fatal for the run and reported as
/// [`IngestError::AnnotationSourceInvalid`].
pub fn extract_annotations(path: &Path) -> Result<Vec<GeneAnnotation>> {
    let invalid = |source: GafError| IngestError::AnnotationSourceInvalid {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(|e| invalid(e.into()))?;
    parse_gaf(BufReader::new(file)).map_err(invalid)
}
