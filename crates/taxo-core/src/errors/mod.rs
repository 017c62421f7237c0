//! Per-subsystem error enums with stable error codes.

pub mod config_error;
pub mod drift_error;
pub mod error_code;
pub mod model_error;
pub mod scorer_error;
pub mod taxonomy_error;

pub use config_error::ConfigError;
pub use drift_error::DriftError;
pub use error_code::TaxoErrorCode;
pub use model_error::ModelError;
pub use scorer_error::ScorerError;
pub use taxonomy_error::TaxonomyError;
