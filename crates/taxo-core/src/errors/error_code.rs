//! TaxoErrorCode trait for structured error reporting.

/// Trait for converting taxo errors to stable code strings.
/// Every error enum implements this so downstream consumers can match on
/// a code instead of parsing display text.
pub trait TaxoErrorCode {
    /// Returns the stable error code string (e.g., "TAXONOMY_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn code_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const TAXONOMY_ERROR: &str = "TAXONOMY_ERROR";
pub const MODEL_MISSING: &str = "MODEL_MISSING";
pub const MODEL_ERROR: &str = "MODEL_ERROR";
pub const SCORER_ERROR: &str = "SCORER_ERROR";
pub const DRIFT_ERROR: &str = "DRIFT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
