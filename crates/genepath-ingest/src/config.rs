//! Configuration management
//!
//! A run is described by three things: where the database goes, which GAF
//! table to load, and which KGML document belongs to which disease. Values
//! come from built-in defaults, an optional TOML file, and then environment
//! overrides, in that order.
//!
//! ```toml
//! database_path = "gene_pathway_db.sqlite"
//! annotation_path = "goa_human.gaf"
//!
//! [[pathways]]
//! path = "KEGG_data/KGML/hsa05010.xml"
//! disease = "Alzheimer's disease"
//! ```

use crate::error::{IngestError, Result};
use genepath_common::Disease;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Ingest Configuration Constants
// ============================================================================

/// Default SQLite database file.
pub const DEFAULT_DATABASE_PATH: &str = "gene_pathway_db.sqlite";

/// Default GO annotation table (human GOA release).
pub const DEFAULT_ANNOTATION_PATH: &str = "goa_human.gaf";

/// Directory holding the default KGML downloads.
pub const DEFAULT_KGML_DIR: &str = "KEGG_data/KGML";

/// KEGG pathway maps loaded when no configuration says otherwise.
pub const DEFAULT_PATHWAYS: [(&str, Disease); 4] = [
    ("hsa05010.xml", Disease::Alzheimers),
    ("hsa05012.xml", Disease::Parkinsons),
    ("hsa04930.xml", Disease::TypeIIDiabetes),
    ("hsa05210.xml", Disease::ColorectalCancer),
];

/// Environment variable overriding the database path.
pub const ENV_DATABASE_PATH: &str = "GENEPATH_DATABASE_PATH";

/// Environment variable overriding the annotation table path.
pub const ENV_ANNOTATION_PATH: &str = "GENEPATH_ANNOTATION_PATH";

/// One KGML document and the disease its entries are tagged with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwaySource {
    pub path: PathBuf,
    pub disease: Disease,
}

impl PathwaySource {
    pub fn new(path: impl Into<PathBuf>, disease: Disease) -> Self {
        Self {
            path: path.into(),
            disease,
        }
    }
}

/// Ingest run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub database_path: PathBuf,
    pub annotation_path: PathBuf,

    /// Processed in list order
    pub pathways: Vec<PathwaySource>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        let kgml_dir = Path::new(DEFAULT_KGML_DIR);

        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            annotation_path: PathBuf::from(DEFAULT_ANNOTATION_PATH),
            pathways: DEFAULT_PATHWAYS
                .iter()
                .map(|(file, disease)| PathwaySource::new(kgml_dir.join(file), *disease))
                .collect(),
        }
    }
}

impl IngestConfig {
    /// Load configuration: defaults, then `config_file` if given, then
    /// environment overrides (including a `.env` file). The result is
    /// validated.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };

        let config = config.merge_env();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            IngestError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content).map_err(|e| {
            IngestError::config(format!("{} (in {})", e, path.display()))
        })
    }

    /// Parse TOML; fields left out keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| IngestError::config(format!("Invalid TOML: {}", e)))
    }

    /// Apply `GENEPATH_*` environment overrides
    pub fn merge_env(mut self) -> Self {
        if let Ok(path) = std::env::var(ENV_DATABASE_PATH) {
            self.database_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var(ENV_ANNOTATION_PATH) {
            self.annotation_path = PathBuf::from(path);
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(IngestError::config("Database path cannot be empty"));
        }

        if self.annotation_path.as_os_str().is_empty() {
            return Err(IngestError::config("Annotation path cannot be empty"));
        }

        if self.pathways.is_empty() {
            return Err(IngestError::config(
                "At least one pathway document must be configured",
            ));
        }

        if let Some(source) = self
            .pathways
            .iter()
            .find(|source| source.path.as_os_str().is_empty())
        {
            return Err(IngestError::config(format!(
                "Pathway document for '{}' has an empty path",
                source.disease
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::default();

        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.annotation_path, PathBuf::from(DEFAULT_ANNOTATION_PATH));
        assert_eq!(config.pathways.len(), 4);
        assert_eq!(
            config.pathways[0],
            PathwaySource::new("KEGG_data/KGML/hsa05010.xml", Disease::Alzheimers)
        );
        assert_eq!(config.pathways[3].disease, Disease::ColorectalCancer);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_overrides_and_defaults() {
        let config = IngestConfig::from_toml_str(
            r#"
            database_path = "out/genes.sqlite"

            [[pathways]]
            path = "kgml/hsa05210.xml"
            disease = "Colorectal cancer"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("out/genes.sqlite"));
        assert_eq!(config.annotation_path, PathBuf::from(DEFAULT_ANNOTATION_PATH));
        assert_eq!(
            config.pathways,
            vec![PathwaySource::new("kgml/hsa05210.xml", Disease::ColorectalCancer)]
        );
    }

    #[test]
    fn test_unknown_disease_is_rejected() {
        let result = IngestConfig::from_toml_str(
            r#"
            [[pathways]]
            path = "kgml/hsa05164.xml"
            disease = "Influenza A"
            "#,
        );

        assert!(matches!(result, Err(IngestError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_pathway_list() {
        let config = IngestConfig {
            pathways: Vec::new(),
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let config = IngestConfig {
            database_path: PathBuf::new(),
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());

        let config = IngestConfig {
            pathways: vec![PathwaySource::new("", Disease::Parkinsons)],
            ..IngestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = IngestConfig::from_toml_file(Path::new("/nonexistent/genepath.toml"));
        assert!(matches!(result, Err(IngestError::Config(_))));
    }
}
