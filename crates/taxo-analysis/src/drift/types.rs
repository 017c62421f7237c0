//! Drift monitoring types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taxo_core::constants::{
    SCORE_BUCKET_COUNT, SCORE_BUCKET_WIDTH, UNCLASSIFIED_BUCKET,
};

use crate::classifier::ClassificationRecord;

/// Normalized distributions of one classification run.
///
/// Two instances exist per comparison: the persisted baseline (mutated only
/// by explicit promotion) and the ephemeral current snapshot recomputed
/// each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSnapshot {
    /// Primary-category frequency; unclassified records land under "none".
    pub category_pmf: BTreeMap<String, f64>,
    /// Score histogram over ten fixed-width buckets spanning 0-100.
    pub score_pmf: BTreeMap<String, f64>,
    pub generated_at: i64,
}

impl DistributionSnapshot {
    /// Build both distributions from a non-empty classification run.
    ///
    /// Category counts include a sentinel bucket for unclassified records;
    /// missing scores are dropped before binning, never zero-filled, so
    /// "missing" can't masquerade as "zero confidence".
    pub fn from_records(records: &[ClassificationRecord], generated_at: i64) -> Self {
        let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut bucket_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut scored = 0usize;

        for record in records {
            let category = record
                .primary_category
                .as_deref()
                .unwrap_or(UNCLASSIFIED_BUCKET);
            *category_counts.entry(category.to_string()).or_insert(0) += 1;

            if let Some(score) = record.primary_score.filter(|s| s.is_finite()) {
                *bucket_counts.entry(score_bucket_label(score)).or_insert(0) += 1;
                scored += 1;
            }
        }

        let total = records.len().max(1) as f64;
        let category_pmf = category_counts
            .into_iter()
            .map(|(k, c)| (k, c as f64 / total))
            .collect();

        let scored = scored.max(1) as f64;
        let score_pmf = bucket_counts
            .into_iter()
            .map(|(k, c)| (k, c as f64 / scored))
            .collect();

        Self {
            category_pmf,
            score_pmf,
            generated_at,
        }
    }
}

/// Bucket label for a score on the 0-100 scale: `"0-9"` … `"90-99"`, with
/// the top bucket absorbing 100.
pub fn score_bucket_label(score: f64) -> String {
    let bucket = ((score / SCORE_BUCKET_WIDTH) as usize).min(SCORE_BUCKET_COUNT - 1);
    let lo = bucket as f64 * SCORE_BUCKET_WIDTH;
    format!("{}-{}", lo as u32, (lo + SCORE_BUCKET_WIDTH) as u32 - 1)
}

/// Alert severity for drift signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DriftSeverity {
    Warning,
    Failure,
}

/// Which distribution drifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftSignal {
    LabelDrift,
    ScoreDrift,
}

impl DriftSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LabelDrift => "label_drift",
            Self::ScoreDrift => "score_drift",
        }
    }
}

/// One threshold violation. Ephemeral: one set per run, never accumulated
/// across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftAlert {
    pub severity: DriftSeverity,
    #[serde(rename = "type")]
    pub signal: DriftSignal,
    pub message: String,
    pub threshold: f64,
    pub value: f64,
    pub generated_at: i64,
}

/// Per-run drift report artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub generated_at: i64,
    pub status: String,
    pub label_js_divergence: Option<f64>,
    pub score_js_divergence: Option<f64>,
    pub label_threshold: f64,
    pub score_threshold: f64,
}

/// Per-run alert list artifact, persisted separately from the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftAlerts {
    pub generated_at: i64,
    pub alerts: Vec<DriftAlert>,
}

/// Everything one drift check produces.
#[derive(Debug, Clone)]
pub struct DriftOutcome {
    pub report: DriftReport,
    pub alerts: DriftAlerts,
    /// Whether this run wrote the baseline candidate (first run under the
    /// key).
    pub baseline_promoted: bool,
}

impl DriftOutcome {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxo_core::types::collections::SmallVec4;

    fn record(id: &str, primary: Option<(&str, f64)>) -> ClassificationRecord {
        ClassificationRecord {
            record_id: id.to_string(),
            primary_category: primary.map(|(c, _)| c.to_string()),
            primary_score: primary.map(|(_, s)| s),
            supporting: SmallVec4::new(),
            evidence: Vec::new(),
            classified_at: 0,
            taxonomy_version: "v1".to_string(),
        }
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(score_bucket_label(0.0), "0-9");
        assert_eq!(score_bucket_label(9.99), "0-9");
        assert_eq!(score_bucket_label(10.0), "10-19");
        assert_eq!(score_bucket_label(95.0), "90-99");
        assert_eq!(score_bucket_label(100.0), "90-99", "top bucket absorbs 100");
    }

    #[test]
    fn test_category_pmf_with_none_bucket() {
        let records = vec![
            record("r1", Some(("a", 80.0))),
            record("r2", Some(("a", 60.0))),
            record("r3", None),
            record("r4", Some(("b", 40.0))),
        ];
        let snapshot = DistributionSnapshot::from_records(&records, 0);
        assert_eq!(snapshot.category_pmf["a"], 0.5);
        assert_eq!(snapshot.category_pmf["b"], 0.25);
        assert_eq!(snapshot.category_pmf["none"], 0.25);
        let total: f64 = snapshot.category_pmf.values().sum();
        assert!((total - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_score_pmf_drops_missing_scores() {
        let records = vec![
            record("r1", Some(("a", 85.0))),
            record("r2", None),
            record("r3", Some(("b", 82.0))),
        ];
        let snapshot = DistributionSnapshot::from_records(&records, 0);
        // Two scored records, both in 80-89; the unscored one is dropped,
        // not binned at zero.
        assert_eq!(snapshot.score_pmf.len(), 1);
        assert_eq!(snapshot.score_pmf["80-89"], 1.0);
    }

    #[test]
    fn test_all_unscored_gives_empty_score_pmf() {
        let records = vec![record("r1", None), record("r2", None)];
        let snapshot = DistributionSnapshot::from_records(&records, 0);
        assert!(snapshot.score_pmf.is_empty());
        assert_eq!(snapshot.category_pmf["none"], 1.0);
    }

    #[test]
    fn test_severity_serialization() {
        assert_eq!(
            serde_json::to_string(&DriftSeverity::Warning).unwrap(),
            "\"WARNING\""
        );
        assert_eq!(
            serde_json::to_string(&DriftSignal::LabelDrift).unwrap(),
            "\"label_drift\""
        );
    }
}
