//! Taxonomy loading errors. Fatal for the classifier: a run without a
//! taxonomy must surface an explicit failure, never a silently-empty result.

use super::error_code::{self, TaxoErrorCode};

/// Errors that can occur while loading or validating a taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse taxonomy: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported taxonomy format version {found} (supported: {supported})")]
    UnsupportedFormat { found: u32, supported: u32 },

    #[error("Invalid taxonomy: {0}")]
    Invalid(String),
}

impl TaxoErrorCode for TaxonomyError {
    fn error_code(&self) -> &'static str {
        error_code::TAXONOMY_ERROR
    }
}
