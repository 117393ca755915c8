// KEGG Markup Language (KGML) Pathway Extraction
//
// A KGML document describes one pathway diagram. Its direct-child <entry>
// elements are the diagram nodes:
//
//   <entry id="10" name="hsa:672 hsa:7157" type="gene" link="...">
//       <graphics .../>
//   </entry>
//
// Each whitespace-separated token of `name` becomes its own PathwayEntry.
// Relations, reactions and graphics are not extracted.
//
// Reference: https://www.kegg.jp/kegg/xml/docs/

pub mod parser;

pub use parser::{extract_pathways, parse_kgml, read_or_skip, try_extract_pathways};

/// Error types for KGML extraction
#[derive(Debug, thiserror::Error)]
pub enum KgmlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed KGML: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Malformed KGML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("Malformed KGML: content after the root element")]
    TrailingContent,
}
