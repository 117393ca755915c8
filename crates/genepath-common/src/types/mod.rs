//! Domain types shared by the extractors and the loader

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Disease Labels
// ============================================================================

/// Disease label attached to every entry of a pathway document.
///
/// The set is closed: each configured KGML document maps to exactly one of
/// these, and the label text is what lands in the `pathways.disease` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Disease {
    #[serde(rename = "Alzheimer's disease")]
    Alzheimers,
    #[serde(rename = "Parkinson's disease")]
    Parkinsons,
    #[serde(rename = "Type II diabetes mellitus")]
    TypeIIDiabetes,
    #[serde(rename = "Colorectal cancer")]
    ColorectalCancer,
}

impl Disease {
    /// Every supported label, in the order the default pipeline loads them.
    pub const ALL: [Disease; 4] = [
        Disease::Alzheimers,
        Disease::Parkinsons,
        Disease::TypeIIDiabetes,
        Disease::ColorectalCancer,
    ];

    /// Label text as stored in the database
    pub fn label(self) -> &'static str {
        match self {
            Disease::Alzheimers => "Alzheimer's disease",
            Disease::Parkinsons => "Parkinson's disease",
            Disease::TypeIIDiabetes => "Type II diabetes mellitus",
            Disease::ColorectalCancer => "Colorectal cancer",
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string does not name one of the supported diseases
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown disease label: '{0}'. Expected one of: Alzheimer's disease, Parkinson's disease, Type II diabetes mellitus, Colorectal cancer")]
pub struct UnknownDisease(pub String);

impl std::str::FromStr for Disease {
    type Err = UnknownDisease;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Disease::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDisease(s.to_string()))
    }
}

// ============================================================================
// Records
// ============================================================================

/// One gene token of one KGML entry, tagged with the document's disease.
///
/// A single `<entry name="hsa:672 hsa:7157">` expands into one record per
/// token; `entry_id` and `entry_type` repeat across them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayEntry {
    pub entry_id: String,
    pub gene_id: String,
    pub entry_type: String,
    pub disease: Disease,
}

impl PathwayEntry {
    pub fn new(
        entry_id: impl Into<String>,
        gene_id: impl Into<String>,
        entry_type: impl Into<String>,
        disease: Disease,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            gene_id: gene_id.into(),
            entry_type: entry_type.into(),
            disease,
        }
    }
}

/// Gene symbol to GO term association taken from a GAF row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeneAnnotation {
    pub gene_id: String,
    pub go_id: String,
}

impl GeneAnnotation {
    pub fn new(gene_id: impl Into<String>, go_id: impl Into<String>) -> Self {
        Self {
            gene_id: gene_id.into(),
            go_id: go_id.into(),
        }
    }
}

// ============================================================================
// Gene Set
// ============================================================================

/// Distinct gene identifiers observed across pathway documents.
///
/// Owned by the pipeline and grown one document at a time. Iteration is
/// sorted so gene inserts happen in a reproducible order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneSet {
    genes: BTreeSet<String>,
}

impl GeneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the gene token of every entry. Returns how many were new.
    pub fn extend_from_entries(&mut self, entries: &[PathwayEntry]) -> usize {
        let before = self.genes.len();
        self.genes
            .extend(entries.iter().map(|entry| entry.gene_id.clone()));
        self.genes.len() - before
    }

    pub fn insert(&mut self, gene_id: impl Into<String>) -> bool {
        self.genes.insert(gene_id.into())
    }

    pub fn contains(&self, gene_id: &str) -> bool {
        self.genes.contains(gene_id)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(String::as_str)
    }
}
