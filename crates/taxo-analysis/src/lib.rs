//! taxo-analysis: taxonomy classification and drift monitoring engine
//!
//! This crate provides the algorithmic core of taxo:
//! - Taxonomy: versioned technology areas, loaded once per run
//! - Classifier: per-category confidence scoring with ranked assignments
//! - Profile: per-entity aggregation (coverage, dominance, specialization)
//! - Drift: Jensen-Shannon divergence against a persisted baseline
//! - Alerts: threshold-comparison collector shared by quality gates
//! - Pipeline: classify → aggregate → drift-check wiring

pub mod alerts;
pub mod classifier;
pub mod drift;
pub mod pipeline;
pub mod profile;
pub mod taxonomy;

// Re-exports for convenience
pub use alerts::{Alert, AlertCollector, AlertRecord, AlertSeverity, AlertType};
pub use classifier::{
    CategoryAssignment, CategoryScorer, ClassificationRecord, Classifier, ClassifierRun,
    Evidence, EvidenceExtractor, KeywordEvidenceExtractor, KeywordScorer, ModelDescriptor,
    RunSummary, ScorerParams, ScorerSet, SourceRecord,
};
pub use drift::{
    js_divergence, DistributionSnapshot, DriftAlert, DriftAlerts, DriftMonitor, DriftOutcome,
    DriftReport, DriftSeverity, DriftSignal, DriftStore, InMemoryDriftStore, JsonDriftStore,
};
pub use pipeline::{
    AnalysisPipeline, EntityRecord, PipelineOutcome, QualitySummary, QualityThresholds,
};
pub use profile::{ClassifiedRecord, EntityAggregator, EntityProfile};
pub use taxonomy::{load_taxonomy, Area, Taxonomy};
