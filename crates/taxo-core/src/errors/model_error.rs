//! Model descriptor errors.
//!
//! `Missing` is the one non-fatal variant: callers map it to a
//! schema-complete classifier run with `ok = false, reason = "model_missing"`.

use super::error_code::{self, TaxoErrorCode};

/// Errors that can occur while loading a model descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model descriptor not found at {0}")]
    Missing(String),

    #[error("Failed to read model descriptor {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported model format version {found} (supported: {supported})")]
    UnsupportedFormat { found: u32, supported: u32 },
}

impl TaxoErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing(_) => error_code::MODEL_MISSING,
            _ => error_code::MODEL_ERROR,
        }
    }
}
