//! Core taxonomy types.

use serde::{Deserialize, Serialize};
use taxo_core::FxHashMap;

/// One technology area within a versioned taxonomy. Immutable per version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub version: String,
}

/// A versioned set of technology areas, loaded once per run and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub version: String,
    areas: Vec<Area>,
    by_id: FxHashMap<String, usize>,
}

impl Taxonomy {
    /// Build a taxonomy from areas. Areas are sorted by id so iteration
    /// order is deterministic.
    pub fn new(version: impl Into<String>, mut areas: Vec<Area>) -> Self {
        areas.sort_by(|a, b| a.id.cmp(&b.id));
        let by_id = areas
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        Self {
            version: version.into(),
            areas,
            by_id,
        }
    }

    /// Areas in ascending id order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Look up an area by id.
    pub fn area(&self, id: &str) -> Option<&Area> {
        self.by_id.get(id).map(|&i| &self.areas[i])
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
