//! Confidence-scored multi-label classifier.
//!
//! One independent scorer per taxonomy category, composed into an ensemble
//! map. Dependency chain: Model → Scorers → Engine (+ optional Evidence).

pub mod engine;
pub mod evidence;
pub mod model;
pub mod scorer;
pub mod types;

pub use engine::Classifier;
pub use evidence::{Evidence, EvidenceExtractor, KeywordEvidenceExtractor};
pub use model::{ModelDescriptor, ScorerParams};
pub use scorer::{CategoryScorer, KeywordScorer, ScorerSet};
pub use types::{
    CategoryAssignment, ClassificationRecord, ClassifierRun, RunSummary, SourceRecord,
};
