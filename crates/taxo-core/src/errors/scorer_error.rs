//! Per-category scorer errors.
//!
//! Scorer failures are isolated by the classifier engine: the failing
//! category is scored 0.0 across the batch and the error is logged, never
//! propagated.

use super::error_code::{self, TaxoErrorCode};

/// Error raised by a single category scorer.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("Scorer failed for category {category}: {message}")]
    Failed { category: String, message: String },

    #[error("Scorer produced a non-finite score for category {0}")]
    NonFinite(String),
}

impl TaxoErrorCode for ScorerError {
    fn error_code(&self) -> &'static str {
        error_code::SCORER_ERROR
    }
}
