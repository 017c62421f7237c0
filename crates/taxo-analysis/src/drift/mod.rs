//! Distribution drift monitoring.
//!
//! Two independent signals per run: category frequency (label drift) and
//! score histogram (score drift), each compared to a persisted baseline via
//! Jensen-Shannon divergence.

pub mod divergence;
pub mod monitor;
pub mod store;
pub mod types;

pub use divergence::js_divergence;
pub use monitor::DriftMonitor;
pub use store::{DriftStore, InMemoryDriftStore, JsonDriftStore};
pub use types::{
    DistributionSnapshot, DriftAlert, DriftAlerts, DriftOutcome, DriftReport, DriftSeverity,
    DriftSignal,
};
