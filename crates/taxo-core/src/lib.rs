//! taxo-core: shared foundation for the taxo classification engine.
//!
//! Provides the pieces every other crate leans on:
//! - Config: explicit, injected run configuration (no ambient env reads)
//! - Errors: per-subsystem error enums with stable error codes
//! - Types: performance-oriented collections, calendar dates
//! - Tracing: logging initialization
//! - Constants: score scale, histogram bins, default thresholds

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-exports for convenience
pub use config::{AggregationStatistic, RunConfig};
pub use errors::{
    ConfigError, DriftError, ModelError, ScorerError, TaxoErrorCode, TaxonomyError,
};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::time::{now_unix, IsoDate};
