//! Taxonomy file loading with explicit format versioning.
//!
//! A missing or invalid taxonomy is fatal for the classifier; the loader
//! never degrades to an empty taxonomy.

use std::path::Path;

use serde::Deserialize;
use taxo_core::constants::TAXONOMY_FORMAT_VERSION;
use taxo_core::FxHashSet;
use taxo_core::TaxonomyError;

use super::types::{Area, Taxonomy};

/// On-disk taxonomy file shape.
#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    format_version: u32,
    version: String,
    areas: Vec<Area>,
}

/// Load and validate a taxonomy from a JSON file.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, TaxonomyError> {
    let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_taxonomy(&raw)
}

/// Parse and validate a taxonomy from a JSON string.
pub fn parse_taxonomy(raw: &str) -> Result<Taxonomy, TaxonomyError> {
    let file: TaxonomyFile = serde_json::from_str(raw)?;

    if file.format_version != TAXONOMY_FORMAT_VERSION {
        return Err(TaxonomyError::UnsupportedFormat {
            found: file.format_version,
            supported: TAXONOMY_FORMAT_VERSION,
        });
    }
    if file.version.trim().is_empty() {
        return Err(TaxonomyError::Invalid(
            "taxonomy version must be non-empty".to_string(),
        ));
    }
    if file.areas.is_empty() {
        return Err(TaxonomyError::Invalid(
            "taxonomy must contain at least one area".to_string(),
        ));
    }

    let mut seen = FxHashSet::default();
    for area in &file.areas {
        if area.id.trim().is_empty() {
            return Err(TaxonomyError::Invalid(
                "area id must be non-empty".to_string(),
            ));
        }
        if !seen.insert(area.id.as_str()) {
            return Err(TaxonomyError::Invalid(format!(
                "duplicate area id: {}",
                area.id
            )));
        }
    }

    let taxonomy = Taxonomy::new(file.version, file.areas);
    tracing::debug!(
        version = %taxonomy.version,
        areas = taxonomy.len(),
        "taxonomy loaded"
    );
    Ok(taxonomy)
}
