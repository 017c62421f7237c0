//! Classifier input/output types.

use serde::{Deserialize, Serialize};
use taxo_core::types::collections::SmallVec4;

/// One free-text input record (grant abstract, patent title, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl SourceRecord {
    /// The searchable text the scorers see: title, abstract, and keywords
    /// joined into one haystack.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.abstract_text.len() + 16 * self.keywords.len(),
        );
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.abstract_text);
        for kw in &self.keywords {
            text.push(' ');
            text.push_str(kw);
        }
        text
    }
}

/// One `(category, score)` pair in a ranked result. Scores are on the
/// canonical 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAssignment {
    pub category: String,
    pub score: f64,
}

/// Ranked assignments for one record: rank 0 = primary.
pub type RankedAssignments = Vec<CategoryAssignment>;

/// Classification output for one record. Immutable once produced; a
/// taxonomy change produces a new full batch instead of mutating rows.
///
/// A record with no confident category is still schema-complete with the
/// category/score fields set to `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub record_id: String,
    pub primary_category: Option<String>,
    pub primary_score: Option<f64>,
    /// Up to 3 supporting assignments, excluding the primary.
    pub supporting: SmallVec4<CategoryAssignment>,
    #[serde(default)]
    pub evidence: Vec<super::evidence::Evidence>,
    pub classified_at: i64,
    pub taxonomy_version: String,
}

impl ClassificationRecord {
    /// Whether this record received at least one category assignment.
    pub fn is_classified(&self) -> bool {
        self.primary_category.is_some()
    }
}

/// Aggregate counters for one classifier run, consumed by the caller's
/// quality gates. Thresholds are applied there, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub classified: usize,
    pub match_rate: f64,
    pub with_evidence: usize,
    pub evidence_coverage: f64,
}

/// Full classifier run output with an explicit status.
///
/// Downstream must check `ok` rather than infer failure from emptiness:
/// a missing model yields `ok = false, reason = "model_missing"` with zero
/// records, which is distinct from a healthy run over an empty batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierRun {
    pub ok: bool,
    #[serde(default)]
    pub reason: Option<String>,
    pub records: Vec<ClassificationRecord>,
    pub summary: RunSummary,
}

impl ClassifierRun {
    /// Run output for a missing model: schema-complete, empty, non-fatal.
    pub fn model_missing() -> Self {
        Self {
            ok: false,
            reason: Some("model_missing".to_string()),
            records: Vec::new(),
            summary: RunSummary::default(),
        }
    }
}
