//! Versioned model descriptor.
//!
//! Replaces opaque blob persistence with an explicit category→parameters
//! map plus metadata, serialized as JSON with a format version checked on
//! load. File presence is never trusted ambiently: a missing descriptor is
//! the distinct `ModelError::Missing`, which callers map to the non-fatal
//! `model_missing` run status.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use taxo_core::constants::MODEL_FORMAT_VERSION;
use taxo_core::ModelError;

use crate::taxonomy::Taxonomy;

use super::scorer::{KeywordScorer, ScorerSet};

/// Parameters for one category's scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerParams {
    pub keywords: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Versioned, explicit description of a trained classifier ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub format_version: u32,
    pub model_version: String,
    pub taxonomy_version: String,
    pub created_at: i64,
    /// Category id → scorer parameters. BTreeMap keeps serialization stable.
    pub categories: BTreeMap<String, ScorerParams>,
}

impl ModelDescriptor {
    /// Derive a keyword-scorer descriptor straight from a taxonomy.
    pub fn from_taxonomy(
        taxonomy: &Taxonomy,
        model_version: impl Into<String>,
        created_at: i64,
    ) -> Self {
        let categories = taxonomy
            .areas()
            .iter()
            .map(|area| {
                (
                    area.id.clone(),
                    ScorerParams {
                        keywords: area.keywords.clone(),
                        weight: 1.0,
                    },
                )
            })
            .collect();
        Self {
            format_version: MODEL_FORMAT_VERSION,
            model_version: model_version.into(),
            taxonomy_version: taxonomy.version.clone(),
            created_at,
            categories,
        }
    }

    /// Load a descriptor from disk, checking the format version.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::Missing(path.display().to_string()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let descriptor: Self = serde_json::from_str(&raw)?;
        if descriptor.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat {
                found: descriptor.format_version,
                supported: MODEL_FORMAT_VERSION,
            });
        }
        Ok(descriptor)
    }

    /// Persist the descriptor as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Build the scorer ensemble described by this model.
    ///
    /// A category whose scorer cannot be built is logged and skipped; the
    /// rest of the ensemble is unaffected.
    pub fn build_scorers(&self) -> ScorerSet {
        let mut scorers = ScorerSet::default();
        for (category, params) in &self.categories {
            match KeywordScorer::new(category.clone(), &params.keywords, params.weight) {
                Ok(scorer) => {
                    scorers.insert(category.clone(), Box::new(scorer));
                }
                Err(e) => {
                    tracing::warn!(category = %category, error = %e, "skipping unbuildable scorer");
                }
            }
        }
        scorers
    }
}
