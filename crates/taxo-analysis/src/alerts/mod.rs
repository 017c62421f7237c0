//! Threshold alerting shared by the run-level quality gates.

pub mod collector;

pub use collector::{Alert, AlertCollector, AlertRecord, AlertSeverity, AlertType};
