//! Generic threshold-comparison accumulator.
//!
//! Each `check_*` call compares a measured value to a configured threshold
//! and, on violation, appends an alert to an ordered list. The value is in
//! the uniform contract reused by multiple quality gates, not in the
//! comparisons themselves.

use serde::{Deserialize, Serialize};

/// Severity of a quality alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Warning,
    Failure,
    Critical,
}

/// Which check produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    MatchRate,
    DurationPerRecord,
    MemoryDelta,
    MemoryPressure,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatchRate => "match_rate",
            Self::DurationPerRecord => "duration_per_record",
            Self::MemoryDelta => "memory_delta",
            Self::MemoryPressure => "memory_pressure",
        }
    }
}

/// One threshold violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub threshold: f64,
    pub actual: f64,
    pub delta_percent: f64,
}

/// Serializable summary of one collector's run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub total: usize,
    pub warnings: usize,
    pub failures: usize,
    pub criticals: usize,
    pub alerts: Vec<Alert>,
}

/// Ordered, per-run alert accumulator. State never carries across runs;
/// build a fresh collector per run.
#[derive(Debug, Default)]
pub struct AlertCollector {
    alerts: Vec<Alert>,
}

impl AlertCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match rate below the threshold is a FAILURE.
    pub fn check_match_rate(&mut self, actual: f64, threshold: f64) -> Option<&Alert> {
        if actual >= threshold {
            return None;
        }
        Some(self.push(
            AlertSeverity::Failure,
            AlertType::MatchRate,
            format!("Match rate {actual:.3} below threshold {threshold:.3}"),
            threshold,
            actual,
        ))
    }

    /// Per-record duration above the threshold is a WARNING.
    pub fn check_duration_per_record(
        &mut self,
        actual_ms: f64,
        threshold_ms: f64,
    ) -> Option<&Alert> {
        if actual_ms <= threshold_ms {
            return None;
        }
        Some(self.push(
            AlertSeverity::Warning,
            AlertType::DurationPerRecord,
            format!("Duration {actual_ms:.1}ms/record above threshold {threshold_ms:.1}ms"),
            threshold_ms,
            actual_ms,
        ))
    }

    /// Memory growth above the threshold is a WARNING.
    pub fn check_memory_delta(&mut self, actual_mb: f64, threshold_mb: f64) -> Option<&Alert> {
        if actual_mb <= threshold_mb {
            return None;
        }
        Some(self.push(
            AlertSeverity::Warning,
            AlertType::MemoryDelta,
            format!("Memory delta {actual_mb:.1}MB above threshold {threshold_mb:.1}MB"),
            threshold_mb,
            actual_mb,
        ))
    }

    /// Two-tier memory pressure check: WARNING above `warn_threshold`,
    /// CRITICAL above `critical_threshold`.
    pub fn check_memory_pressure(
        &mut self,
        used_fraction: f64,
        warn_threshold: f64,
        critical_threshold: f64,
    ) -> Option<&Alert> {
        let (severity, threshold) = if used_fraction > critical_threshold {
            (AlertSeverity::Critical, critical_threshold)
        } else if used_fraction > warn_threshold {
            (AlertSeverity::Warning, warn_threshold)
        } else {
            return None;
        };
        Some(self.push(
            severity,
            AlertType::MemoryPressure,
            format!("Memory pressure {used_fraction:.2} above threshold {threshold:.2}"),
            threshold,
            used_fraction,
        ))
    }

    fn push(
        &mut self,
        severity: AlertSeverity,
        alert_type: AlertType,
        message: String,
        threshold: f64,
        actual: f64,
    ) -> &Alert {
        let delta_percent = if threshold != 0.0 {
            (actual - threshold) / threshold * 100.0
        } else {
            0.0
        };
        tracing::warn!(
            check = alert_type.as_str(),
            severity = ?severity,
            actual,
            threshold,
            "quality threshold violated"
        );
        let idx = self.alerts.len();
        self.alerts.push(Alert {
            severity,
            alert_type,
            message,
            threshold,
            actual,
            delta_percent,
        });
        &self.alerts[idx]
    }

    /// All alerts in the order they were raised.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Any FAILURE or CRITICAL alert present.
    pub fn has_failures(&self) -> bool {
        self.alerts
            .iter()
            .any(|a| matches!(a.severity, AlertSeverity::Failure | AlertSeverity::Critical))
    }

    /// Any WARNING alert present.
    pub fn has_warnings(&self) -> bool {
        self.alerts
            .iter()
            .any(|a| a.severity == AlertSeverity::Warning)
    }

    /// Serialize to a structured record with counts by severity.
    pub fn to_record(&self) -> AlertRecord {
        let count = |severity: AlertSeverity| {
            self.alerts.iter().filter(|a| a.severity == severity).count()
        };
        AlertRecord {
            total: self.alerts.len(),
            warnings: count(AlertSeverity::Warning),
            failures: count(AlertSeverity::Failure),
            criticals: count(AlertSeverity::Critical),
            alerts: self.alerts.clone(),
        }
    }
}
