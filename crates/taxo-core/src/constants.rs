//! Shared constants for the taxo classification engine.

/// taxo version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of the canonical score scale. Scorers emit [0,1]; every
/// persisted score lives on [0,100].
pub const SCORE_SCALE: f64 = 100.0;

/// Width of one score histogram bucket.
pub const SCORE_BUCKET_WIDTH: f64 = 10.0;

/// Number of score histogram buckets spanning the score scale.
pub const SCORE_BUCKET_COUNT: usize = 10;

/// Sentinel distribution key for records without a primary category.
pub const UNCLASSIFIED_BUCKET: &str = "none";

/// Maximum supporting categories per record (positions 1-3 after primary),
/// independent of the configured top_k.
pub const MAX_SUPPORTING: usize = 3;

/// Default high-confidence threshold on the 0-100 scale.
pub const DEFAULT_HIGH_CONFIDENCE_THRESHOLD: f64 = 70.0;

/// Default minimum evidence coverage for quality checks.
pub const DEFAULT_EVIDENCE_COVERAGE_THRESHOLD: f64 = 0.80;

/// Default Jensen-Shannon divergence threshold for label drift.
pub const DEFAULT_LABEL_JS_THRESHOLD: f64 = 0.10;

/// Default Jensen-Shannon divergence threshold for score drift.
pub const DEFAULT_SCORE_JS_THRESHOLD: f64 = 0.15;

/// Default number of categories retained per entity profile.
pub const DEFAULT_TOP_N_CATEGORIES: usize = 10;

/// Default ranked assignments per record.
pub const DEFAULT_TOP_K_PER_RECORD: usize = 3;

/// Supported taxonomy file format version.
pub const TAXONOMY_FORMAT_VERSION: u32 = 1;

/// Supported model descriptor format version.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Trend period label for records with neither a period nor a parseable date.
pub const UNKNOWN_PERIOD: &str = "unknown";
