//! Run configuration, explicit and injected at construction.

pub mod run_config;

pub use run_config::{AggregationStatistic, RunConfig};
