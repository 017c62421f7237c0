//! Drift baseline and artifact store errors.

use super::error_code::{self, TaxoErrorCode};

/// Errors that can occur while reading or writing drift artifacts.
#[derive(Debug, thiserror::Error)]
pub enum DriftError {
    #[error("Failed to access drift artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize drift artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TaxoErrorCode for DriftError {
    fn error_code(&self) -> &'static str {
        error_code::DRIFT_ERROR
    }
}
