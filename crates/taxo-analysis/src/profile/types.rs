//! Entity aggregation input/output types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taxo_core::IsoDate;

use crate::classifier::ClassificationRecord;

/// One row of the classification table joined with entity metadata.
///
/// The entity id is taken exactly as supplied — a malformed or empty id is
/// preserved, not defaulted; upstream validation is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub entity_id: String,
    #[serde(default)]
    pub entity_name: Option<String>,
    /// Free-text record date; only a `YYYY-MM-DD` prefix is parseable.
    #[serde(default)]
    pub record_date: Option<String>,
    /// Explicit trend period (e.g. a program phase). Overrides the
    /// calendar-year period derived from `record_date`.
    #[serde(default)]
    pub period_label: Option<String>,
    pub classification: ClassificationRecord,
}

/// One profile per entity, fully recomputed on every aggregation run and
/// overwritten wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProfile {
    pub entity_id: String,
    pub entity_name: Option<String>,
    pub total_records: usize,
    pub records_with_category: usize,
    /// Fraction of records with at least one category, in [0,1].
    pub coverage: f64,
    pub dominant_category: Option<String>,
    pub dominant_score: Option<f64>,
    /// Herfindahl-Hirschman concentration over the trimmed category map,
    /// in [0,1].
    pub specialization_score: f64,
    /// Top-n categories by aggregate score.
    pub category_scores: BTreeMap<String, f64>,
    pub first_record_date: Option<IsoDate>,
    pub last_record_date: Option<IsoDate>,
    /// Period label → per-category share of that period's score mass.
    pub trend: BTreeMap<String, BTreeMap<String, f64>>,
}
