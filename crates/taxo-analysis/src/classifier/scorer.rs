//! Per-category scorers.
//!
//! The ensemble is a map from category id to scorer — pure composition,
//! no inheritance hierarchy. Scorers return [0,1]; the engine scales onto
//! the canonical 0-100 range when records are built.

use aho_corasick::AhoCorasick;
use taxo_core::{FxHashMap, FxHashSet, ScorerError};

/// Capability implemented once per taxonomy category.
pub trait CategoryScorer: Send + Sync {
    /// Score one text in [0,1].
    fn score(&self, text: &str) -> Result<f64, ScorerError>;

    /// Score a whole batch. The default applies `score` per text and stops
    /// at the first failure; the engine substitutes 0.0 for the category
    /// when that happens.
    fn score_batch(&self, texts: &[String]) -> Result<Vec<f64>, ScorerError> {
        texts.iter().map(|t| self.score(t)).collect()
    }
}

/// Ensemble of scorers keyed by category id.
pub type ScorerSet = FxHashMap<String, Box<dyn CategoryScorer>>;

/// Keyword-coverage scorer: fraction of the category's keywords found in
/// the text, weighted, saturating at 1.0.
pub struct KeywordScorer {
    category: String,
    automaton: AhoCorasick,
    keyword_count: usize,
    weight: f64,
}

impl KeywordScorer {
    /// Build a scorer from a category's keyword list.
    ///
    /// Matching is ascii-case-insensitive; the automaton is built once and
    /// reused across the whole batch.
    pub fn new(
        category: impl Into<String>,
        keywords: &[String],
        weight: f64,
    ) -> Result<Self, ScorerError> {
        let category = category.into();
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(keywords)
            .map_err(|e| ScorerError::Failed {
                category: category.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            category,
            automaton,
            keyword_count: keywords.len(),
            weight,
        })
    }
}

impl CategoryScorer for KeywordScorer {
    fn score(&self, text: &str) -> Result<f64, ScorerError> {
        let mut matched: FxHashSet<usize> = FxHashSet::default();
        for m in self.automaton.find_iter(text) {
            matched.insert(m.pattern().as_usize());
        }
        let coverage = matched.len() as f64 / self.keyword_count.max(1) as f64;
        let score = (coverage * self.weight).clamp(0.0, 1.0);
        if !score.is_finite() {
            return Err(ScorerError::NonFinite(self.category.clone()));
        }
        Ok(score)
    }
}
