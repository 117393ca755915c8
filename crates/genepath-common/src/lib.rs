//! Genepath Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared domain types and logging setup for the genepath workspace.
//!
//! # Overview
//!
//! - **Types**: genes, pathway entries, GO annotations and the disease labels
//!   that tag each pathway document
//! - **Logging**: tracing subscriber configuration shared by every binary
//!
//! # Example
//!
//! ```
//! use genepath_common::types::{Disease, GeneSet, PathwayEntry};
//!
//! let entry = PathwayEntry::new("10", "BRCA1", "gene", Disease::ColorectalCancer);
//! let mut genes = GeneSet::new();
//! genes.extend_from_entries(std::slice::from_ref(&entry));
//! assert!(genes.contains("BRCA1"));
//! ```

pub mod logging;
pub mod types;

// Re-export commonly used types
pub use types::{Disease, GeneAnnotation, GeneSet, PathwayEntry};
