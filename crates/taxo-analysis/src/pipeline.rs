//! Full-run wiring: classify → aggregate → drift-check.
//!
//! Each stage consumes the complete output of the prior stage; there is no
//! streaming or partial evaluation. The run-level quality gates (match
//! rate, stage duration) feed the shared alert collector, and the §6-style
//! confidence/evidence thresholds are consumed here, not inside the
//! classifier.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use taxo_core::{DriftError, RunConfig};

use crate::alerts::{AlertCollector, AlertRecord};
use crate::classifier::{Classifier, ClassifierRun, ScorerSet, SourceRecord};
use crate::drift::{DriftMonitor, DriftOutcome, DriftStore};
use crate::profile::{ClassifiedRecord, EntityAggregator, EntityProfile};
use crate::taxonomy::Taxonomy;

/// One input record joined with its entity metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    pub entity_id: String,
    #[serde(default)]
    pub entity_name: Option<String>,
    #[serde(default)]
    pub record_date: Option<String>,
    #[serde(default)]
    pub period_label: Option<String>,
    pub source: SourceRecord,
}

/// Run-level quality thresholds consumed by the alert collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    /// Minimum fraction of records receiving a category.
    pub min_match_rate: f64,
    /// Maximum classification wall time per record.
    pub max_duration_per_record_ms: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_match_rate: 0.50,
            max_duration_per_record_ms: 50.0,
        }
    }
}

/// Confidence/evidence counters plus the collected quality alerts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualitySummary {
    /// Classified records at or above the high-confidence threshold.
    pub high_confidence: usize,
    pub high_confidence_rate: f64,
    pub evidence_coverage: f64,
    pub evidence_coverage_ok: bool,
    pub alerts: Option<AlertRecord>,
}

/// Everything one full run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub run: ClassifierRun,
    pub profiles: Vec<EntityProfile>,
    /// None when the classifier run was not ok (downstream skipped).
    pub drift: Option<DriftOutcome>,
    pub quality: QualitySummary,
}

/// Batch-oriented orchestration of the three core stages.
pub struct AnalysisPipeline<S: DriftStore> {
    classifier: Classifier,
    aggregator: EntityAggregator,
    monitor: DriftMonitor<S>,
    config: RunConfig,
    quality: QualityThresholds,
    taxonomy_version: String,
}

impl<S: DriftStore> AnalysisPipeline<S> {
    pub fn new(taxonomy: Arc<Taxonomy>, scorers: ScorerSet, store: S, config: RunConfig) -> Self {
        let taxonomy_version = taxonomy.version.clone();
        Self {
            classifier: Classifier::new(taxonomy, scorers, config.clone()),
            aggregator: EntityAggregator::new(config.clone()),
            monitor: DriftMonitor::new(store, config.clone()),
            config,
            quality: QualityThresholds::default(),
            taxonomy_version,
        }
    }

    pub fn with_quality_thresholds(mut self, quality: QualityThresholds) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_evidence_extractor(
        mut self,
        extractor: Box<dyn crate::classifier::EvidenceExtractor>,
    ) -> Self {
        self.classifier = self.classifier.with_evidence_extractor(extractor);
        self
    }

    /// Run all three stages over a complete batch.
    ///
    /// A not-ok classifier run (missing model) short-circuits aggregation
    /// and drift; the outcome still carries the run status for downstream
    /// to check.
    pub fn run(&self, records: &[EntityRecord]) -> Result<PipelineOutcome, DriftError> {
        let started = Instant::now();

        let sources: Vec<SourceRecord> = records.iter().map(|r| r.source.clone()).collect();
        let run = self.classifier.classify_records(&sources);

        if !run.ok {
            tracing::warn!(reason = ?run.reason, "classifier run not ok; skipping downstream stages");
            return Ok(PipelineOutcome {
                run,
                profiles: Vec::new(),
                drift: None,
                quality: QualitySummary::default(),
            });
        }

        let rows: Vec<ClassifiedRecord> = records
            .iter()
            .zip(run.records.iter())
            .map(|(input, classification)| ClassifiedRecord {
                entity_id: input.entity_id.clone(),
                entity_name: input.entity_name.clone(),
                record_date: input.record_date.clone(),
                period_label: input.period_label.clone(),
                classification: classification.clone(),
            })
            .collect();

        let profiles = self.aggregator.aggregate(&rows);
        let drift = self.monitor.check(&run.records, &self.taxonomy_version)?;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let quality = self.quality_summary(&run, elapsed_ms);

        Ok(PipelineOutcome {
            run,
            profiles,
            drift: Some(drift),
            quality,
        })
    }

    fn quality_summary(&self, run: &ClassifierRun, elapsed_ms: f64) -> QualitySummary {
        let high_confidence = run
            .records
            .iter()
            .filter(|r| {
                r.primary_score
                    .is_some_and(|s| s >= self.config.high_confidence_threshold)
            })
            .count();

        let mut collector = AlertCollector::new();
        if run.summary.total > 0 {
            collector.check_match_rate(run.summary.match_rate, self.quality.min_match_rate);
            collector.check_duration_per_record(
                elapsed_ms / run.summary.total as f64,
                self.quality.max_duration_per_record_ms,
            );
        }

        QualitySummary {
            high_confidence,
            high_confidence_rate: high_confidence as f64 / run.summary.classified.max(1) as f64,
            evidence_coverage: run.summary.evidence_coverage,
            // Vacuously ok when nothing classified.
            evidence_coverage_ok: run.summary.classified == 0
                || run.summary.evidence_coverage >= self.config.evidence_coverage_threshold,
            alerts: Some(collector.to_record()),
        }
    }
}
