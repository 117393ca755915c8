// KGML Parser

use crate::error::{IngestError, Result};
use crate::kgml::KgmlError;
use genepath_common::{Disease, PathwayEntry};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// `<pathway>` root; everything except its entries is ignored
#[derive(Debug, Deserialize)]
struct KgmlPathway {
    #[serde(rename = "entry", default)]
    entries: Vec<KgmlEntry>,
}

#[derive(Debug, Deserialize)]
struct KgmlEntry {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type")]
    entry_type: String,
}

impl KgmlEntry {
    /// One record per gene token, in token order
    fn into_pathway_entries(self, disease: Disease) -> Vec<PathwayEntry> {
        self.name
            .split_whitespace()
            .map(|token| PathwayEntry::new(&self.id, token, &self.entry_type, disease))
            .collect()
    }
}

/// Walk the whole document and reject anything but whitespace, comments or
/// processing instructions after the root element closes.
///
/// The deserializer stops reading once the root is complete.
fn check_document_end(content: &str) -> std::result::Result<(), KgmlError> {
    let mut reader = Reader::from_str(content);
    let mut depth = 0usize;
    let mut root_closed = false;

    loop {
        match reader.read_event()? {
            Event::Start(_) if root_closed => return Err(KgmlError::TrailingContent),
            Event::Empty(_) if root_closed => return Err(KgmlError::TrailingContent),
            Event::CData(_) if root_closed => return Err(KgmlError::TrailingContent),
            Event::Text(text) if root_closed && !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(KgmlError::TrailingContent)
            },
            Event::Start(_) => depth += 1,
            Event::Empty(_) if depth == 0 => root_closed = true,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                root_closed = depth == 0;
            },
            Event::Eof => return Ok(()),
            _ => {},
        }
    }
}

/// Parse KGML content into pathway entries tagged with `disease`.
///
/// Entries whose name holds no tokens contribute nothing.
pub fn parse_kgml(
    content: &str,
    disease: Disease,
) -> std::result::Result<Vec<PathwayEntry>, KgmlError> {
    check_document_end(content)?;
    let pathway: KgmlPathway = quick_xml::de::from_str(content)?;

    let entry_count = pathway.entries.len();
    let records: Vec<PathwayEntry> = pathway
        .entries
        .into_iter()
        .flat_map(|entry| entry.into_pathway_entries(disease))
        .collect();

    debug!(
        entries = entry_count,
        records = records.len(),
        disease = %disease,
        "Expanded KGML entries"
    );

    Ok(records)
}

/// Read and parse one KGML document, surfacing failures as
/// [`IngestError::SourceUnreadable`].
pub fn try_extract_pathways(path: &Path, disease: Disease) -> Result<Vec<PathwayEntry>> {
    let unreadable = |source: KgmlError| IngestError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let content = std::fs::read_to_string(path).map_err(|e| unreadable(e.into()))?;
    let records = parse_kgml(&content, disease).map_err(unreadable)?;

    info!(
        path = %path.display(),
        disease = %disease,
        records = records.len(),
        "Parsed pathway document"
    );

    Ok(records)
}

/// Read one KGML document, or log why it is being skipped and return `None`.
///
/// Recoverable failures are skipped; anything else is passed back.
pub fn read_or_skip(path: &Path, disease: Disease) -> Result<Option<Vec<PathwayEntry>>> {
    match try_extract_pathways(path, disease) {
        Ok(records) => Ok(Some(records)),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "Skipping pathway document");
            Ok(None)
        },
        Err(e) => Err(e),
    }
}

/// Extract pathway entries from one KGML document.
///
/// A document that cannot be read or parsed yields no entries; the failure
/// is logged and the caller carries on with its remaining documents.
pub fn extract_pathways(path: &Path, disease: Disease) -> Vec<PathwayEntry> {
    read_or_skip(path, disease).ok().flatten().unwrap_or_default()
}
