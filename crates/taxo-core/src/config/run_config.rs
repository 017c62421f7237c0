//! Run configuration for classification, aggregation, and drift monitoring.
//!
//! Every threshold is enumerated here and passed by the caller; nothing is
//! read ambiently from the environment.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

/// Statistic used to aggregate per-category scores within an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationStatistic {
    #[default]
    Mean,
    Median,
}

/// Configuration for a full classify → aggregate → drift-check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Score (0-100) at or above which an assignment counts as high confidence.
    pub high_confidence_threshold: f64,
    /// Minimum fraction of primary assignments carrying evidence.
    pub evidence_coverage_threshold: f64,
    /// Jensen-Shannon divergence threshold for label drift.
    pub label_js_threshold: f64,
    /// Jensen-Shannon divergence threshold for score drift.
    pub score_js_threshold: f64,
    /// Categories retained per entity profile.
    pub top_n_categories: usize,
    /// Statistic for per-category score aggregation.
    pub aggregation_statistic: AggregationStatistic,
    /// Ranked assignments produced per record.
    pub top_k_per_record: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            high_confidence_threshold: constants::DEFAULT_HIGH_CONFIDENCE_THRESHOLD,
            evidence_coverage_threshold: constants::DEFAULT_EVIDENCE_COVERAGE_THRESHOLD,
            label_js_threshold: constants::DEFAULT_LABEL_JS_THRESHOLD,
            score_js_threshold: constants::DEFAULT_SCORE_JS_THRESHOLD,
            top_n_categories: constants::DEFAULT_TOP_N_CATEGORIES,
            aggregation_statistic: AggregationStatistic::Mean,
            top_k_per_record: constants::DEFAULT_TOP_K_PER_RECORD,
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "run config loaded");
        Ok(config)
    }

    /// Validate threshold ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=constants::SCORE_SCALE).contains(&self.high_confidence_threshold) {
            return Err(ConfigError::InvalidThreshold {
                name: "high_confidence_threshold",
                value: self.high_confidence_threshold,
                expected: "0-100",
            });
        }
        if !(0.0..=1.0).contains(&self.evidence_coverage_threshold) {
            return Err(ConfigError::InvalidThreshold {
                name: "evidence_coverage_threshold",
                value: self.evidence_coverage_threshold,
                expected: "0-1",
            });
        }
        if self.label_js_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "label_js_threshold",
                value: self.label_js_threshold,
                expected: "> 0",
            });
        }
        if self.score_js_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "score_js_threshold",
                value: self.score_js_threshold,
                expected: "> 0",
            });
        }
        Ok(())
    }
}
