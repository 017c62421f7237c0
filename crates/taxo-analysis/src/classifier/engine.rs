//! Batch classification engine.
//!
//! Scores every category over the whole batch (parallel across categories,
//! no shared mutable state), then ranks per record. Results are merged by
//! ascending category id regardless of completion order, so output is
//! deterministic.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use taxo_core::constants::{MAX_SUPPORTING, SCORE_SCALE};
use taxo_core::{now_unix, RunConfig};

use crate::taxonomy::Taxonomy;

use super::evidence::EvidenceExtractor;
use super::model::ModelDescriptor;
use super::scorer::ScorerSet;
use super::types::{
    CategoryAssignment, ClassificationRecord, ClassifierRun, RankedAssignments, RunSummary,
    SourceRecord,
};

/// Confidence-scored multi-label classifier over a fixed taxonomy.
pub struct Classifier {
    taxonomy: Arc<Taxonomy>,
    scorers: ScorerSet,
    evidence: Option<Box<dyn EvidenceExtractor>>,
    config: RunConfig,
}

impl Classifier {
    /// Create a classifier from an explicit scorer ensemble.
    pub fn new(taxonomy: Arc<Taxonomy>, scorers: ScorerSet, config: RunConfig) -> Self {
        Self {
            taxonomy,
            scorers,
            evidence: None,
            config,
        }
    }

    /// Create a classifier from a model descriptor.
    pub fn from_model(
        taxonomy: Arc<Taxonomy>,
        descriptor: &ModelDescriptor,
        config: RunConfig,
    ) -> Self {
        Self::new(taxonomy, descriptor.build_scorers(), config)
    }

    /// Attach an evidence extractor. The classifier works without one;
    /// records then carry an empty evidence list.
    pub fn with_evidence_extractor(mut self, extractor: Box<dyn EvidenceExtractor>) -> Self {
        self.evidence = Some(extractor);
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Rank categories for every record in the batch.
    ///
    /// The result length always equals the input length, including for an
    /// empty batch. A failing category scorer is scored 0.0 across the
    /// whole batch and logged, never propagated. With no scorers
    /// configured, every record gets an empty ranked list.
    pub fn classify_batch(
        &self,
        records: &[SourceRecord],
        top_k: usize,
    ) -> Vec<RankedAssignments> {
        if records.is_empty() {
            return Vec::new();
        }
        if self.scorers.is_empty() {
            return vec![Vec::new(); records.len()];
        }

        let texts: Vec<String> = records.iter().map(|r| r.searchable_text()).collect();

        let mut category_ids: Vec<&str> = self.scorers.keys().map(|k| k.as_str()).collect();
        category_ids.sort_unstable();

        // One score vector per category, in category-id order. par_iter's
        // indexed collect keeps the merge deterministic no matter which
        // category finishes first.
        let per_category: Vec<Vec<f64>> = category_ids
            .par_iter()
            .map(|id| match self.scorers[*id].score_batch(&texts) {
                Ok(scores) => scores.into_iter().map(sanitize_unit_score).collect(),
                Err(e) => {
                    tracing::warn!(
                        category = %id,
                        error = %e,
                        "scorer failed; substituting 0.0 across batch"
                    );
                    vec![0.0; texts.len()]
                }
            })
            .collect();

        (0..records.len())
            .map(|row| {
                let mut ranked: Vec<CategoryAssignment> = category_ids
                    .iter()
                    .enumerate()
                    .map(|(col, id)| CategoryAssignment {
                        category: (*id).to_string(),
                        score: per_category[col][row] * SCORE_SCALE,
                    })
                    .collect();
                ranked.sort_by(compare_ranked);
                ranked.truncate(top_k);
                ranked
            })
            .collect()
    }

    /// Classify a batch into schema-complete classification records.
    ///
    /// Missing scorers are non-fatal: the run comes back with
    /// `ok = false, reason = "model_missing"` and zero records, which
    /// downstream must check instead of inferring from emptiness.
    pub fn classify_records(&self, records: &[SourceRecord]) -> ClassifierRun {
        self.classify_records_at(records, now_unix())
    }

    /// Same as [`classify_records`](Self::classify_records) with an explicit
    /// timestamp.
    pub fn classify_records_at(
        &self,
        records: &[SourceRecord],
        classified_at: i64,
    ) -> ClassifierRun {
        if self.scorers.is_empty() {
            tracing::warn!("no scorers configured; returning model_missing run");
            return ClassifierRun::model_missing();
        }

        let ranked_lists = self.classify_batch(records, self.config.top_k_per_record);

        let mut classified = 0usize;
        let mut with_evidence = 0usize;
        let rows: Vec<ClassificationRecord> = records
            .iter()
            .zip(ranked_lists)
            .map(|(record, ranked)| {
                let row = self.build_record(record, ranked, classified_at);
                if row.is_classified() {
                    classified += 1;
                    if !row.evidence.is_empty() {
                        with_evidence += 1;
                    }
                }
                row
            })
            .collect();

        let total = rows.len();
        let summary = RunSummary {
            total,
            classified,
            match_rate: classified as f64 / total.max(1) as f64,
            with_evidence,
            evidence_coverage: with_evidence as f64 / classified.max(1) as f64,
        };

        tracing::debug!(
            total,
            classified,
            match_rate = summary.match_rate,
            "classifier run complete"
        );

        ClassifierRun {
            ok: true,
            reason: None,
            records: rows,
            summary,
        }
    }

    fn build_record(
        &self,
        record: &SourceRecord,
        ranked: RankedAssignments,
        classified_at: i64,
    ) -> ClassificationRecord {
        // A zero top score means no confident category: the record stays
        // schema-complete with null category fields.
        let primary = ranked.first().filter(|a| a.score > 0.0).cloned();

        let supporting = ranked
            .iter()
            .skip(1)
            .filter(|a| a.score > 0.0)
            .take(MAX_SUPPORTING)
            .cloned()
            .collect();

        let evidence = match (&primary, &self.evidence) {
            (Some(p), Some(extractor)) => extractor.extract(record, p, &self.taxonomy),
            _ => Vec::new(),
        };

        ClassificationRecord {
            record_id: record.id.clone(),
            primary_category: primary.as_ref().map(|a| a.category.clone()),
            primary_score: primary.as_ref().map(|a| a.score),
            supporting,
            evidence,
            classified_at,
            taxonomy_version: self.taxonomy.version.clone(),
        }
    }
}

/// Clamp a raw scorer output onto [0,1]; anything malformed becomes 0.0.
fn sanitize_unit_score(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 {
        score.min(1.0)
    } else {
        0.0
    }
}

/// Score descending, ties broken by category id ascending.
fn compare_ranked(a: &CategoryAssignment, b: &CategoryAssignment) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.category.cmp(&b.category))
}
