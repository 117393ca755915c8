// GAF row model

use genepath_common::GeneAnnotation;
use serde::Deserialize;

/// Number of columns in a GAF 2.x row
pub const GAF_COLUMN_COUNT: usize = 17;

/// One GAF 2.x row, columns in file order.
///
/// Every field is text. Identifiers such as `GO:0006915` or numeric-looking
/// gene symbols are never coerced, so nothing is lost to number parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GafRecord {
    /// Column 1, e.g. "UniProtKB"
    pub db: String,
    /// Column 2, e.g. "P04637"
    pub db_object_id: String,
    /// Column 3, e.g. "TP53"
    pub db_object_symbol: String,
    /// Column 4, e.g. "involved_in" or "NOT|enables"
    pub qualifier: String,
    /// Column 5, e.g. "GO:0006915"
    pub go_id: String,
    /// Column 6, e.g. "PMID:12345678"
    pub db_reference: String,
    /// Column 7, e.g. "IDA"
    pub evidence_code: String,
    pub with_or_from: String,
    /// Column 9: P, F or C
    pub aspect: String,
    pub db_object_name: String,
    pub db_object_synonym: String,
    pub db_object_type: String,
    /// Column 13, e.g. "taxon:9606"
    pub taxon: String,
    /// Column 14, YYYYMMDD
    pub date: String,
    pub assigned_by: String,
    pub annotation_extension: String,
    pub gene_product_form_id: String,
}

impl GafRecord {
    /// Gene symbol used as the annotation's gene id
    pub fn gene_symbol(&self) -> &str {
        &self.db_object_symbol
    }

    pub fn go_id(&self) -> &str {
        &self.go_id
    }

    /// The two loaded columns as an annotation
    pub fn to_annotation(&self) -> GeneAnnotation {
        GeneAnnotation::new(self.gene_symbol(), self.go_id())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_takes_symbol_and_go_id() {
        let mut fields = vec![""; GAF_COLUMN_COUNT];
        fields[0] = "UniProtKB";
        fields[1] = "P04637";
        fields[2] = "TP53";
        fields[4] = "GO:0006915";
        fields[6] = "IDA";
        let record: GafRecord = csv::StringRecord::from(fields).deserialize(None).unwrap();

        assert_eq!(record.gene_symbol(), "TP53");
        assert_eq!(record.go_id(), "GO:0006915");
        assert_eq!(record.to_annotation(), GeneAnnotation::new("TP53", "GO:0006915"));
    }
}
