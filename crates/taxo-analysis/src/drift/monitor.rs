//! Drift monitor: snapshot, compare, alert.

use taxo_core::{now_unix, DriftError, RunConfig};

use crate::classifier::ClassificationRecord;

use super::divergence::js_divergence;
use super::store::DriftStore;
use super::types::{
    DistributionSnapshot, DriftAlert, DriftAlerts, DriftOutcome, DriftReport, DriftSeverity,
    DriftSignal,
};

/// Detects shift between the current run's output distributions and a
/// persisted baseline.
pub struct DriftMonitor<S: DriftStore> {
    store: S,
    config: RunConfig,
}

impl<S: DriftStore> DriftMonitor<S> {
    pub fn new(store: S, config: RunConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check the current run against the baseline stored under
    /// `baseline_key` (typically the taxonomy version).
    ///
    /// A missing baseline never blocks the run: the current snapshot is
    /// promoted as the baseline candidate and no alert is emitted.
    pub fn check(
        &self,
        records: &[ClassificationRecord],
        baseline_key: &str,
    ) -> Result<DriftOutcome, DriftError> {
        self.check_at(records, baseline_key, now_unix())
    }

    /// Same as [`check`](Self::check) with an explicit timestamp.
    pub fn check_at(
        &self,
        records: &[ClassificationRecord],
        baseline_key: &str,
        generated_at: i64,
    ) -> Result<DriftOutcome, DriftError> {
        if records.is_empty() {
            tracing::warn!("drift check short-circuited: no input records");
            return self.finish(
                self.report(generated_at, "no input", None, None),
                Vec::new(),
                false,
                generated_at,
            );
        }

        let current = DistributionSnapshot::from_records(records, generated_at);

        let Some(baseline) = self.store.load_baseline(baseline_key)? else {
            // First run under this key: the current snapshot becomes the
            // baseline candidate and the run is never penalized.
            self.store.promote_baseline(baseline_key, &current)?;
            tracing::info!(key = %baseline_key, "no baseline found; promoted current snapshot as candidate");
            return self.finish(
                self.report(generated_at, "baseline_created", None, None),
                Vec::new(),
                true,
                generated_at,
            );
        };

        let label_js = js_divergence(&baseline.category_pmf, &current.category_pmf);
        let score_js = js_divergence(&baseline.score_pmf, &current.score_pmf);

        let mut alerts = Vec::new();
        alerts.extend(threshold_alert(
            DriftSignal::LabelDrift,
            label_js,
            self.config.label_js_threshold,
            generated_at,
        ));
        alerts.extend(threshold_alert(
            DriftSignal::ScoreDrift,
            score_js,
            self.config.score_js_threshold,
            generated_at,
        ));

        if !alerts.is_empty() {
            tracing::warn!(
                label_js,
                score_js,
                alerts = alerts.len(),
                "distribution drift detected"
            );
        }

        self.finish(
            self.report(generated_at, "ok", Some(label_js), Some(score_js)),
            alerts,
            false,
            generated_at,
        )
    }

    fn report(
        &self,
        generated_at: i64,
        status: &str,
        label_js: Option<f64>,
        score_js: Option<f64>,
    ) -> DriftReport {
        DriftReport {
            generated_at,
            status: status.to_string(),
            label_js_divergence: label_js,
            score_js_divergence: score_js,
            label_threshold: self.config.label_js_threshold,
            score_threshold: self.config.score_js_threshold,
        }
    }

    /// Persist the report and alert list as two separate artifacts.
    fn finish(
        &self,
        report: DriftReport,
        alerts: Vec<DriftAlert>,
        baseline_promoted: bool,
        generated_at: i64,
    ) -> Result<DriftOutcome, DriftError> {
        let alerts = DriftAlerts {
            generated_at,
            alerts,
        };
        self.store.write_report(&report)?;
        self.store.write_alerts(&alerts)?;
        Ok(DriftOutcome {
            report,
            alerts,
            baseline_promoted,
        })
    }
}

/// WARNING above the threshold, FAILURE above twice the threshold.
fn threshold_alert(
    signal: DriftSignal,
    value: f64,
    threshold: f64,
    generated_at: i64,
) -> Option<DriftAlert> {
    let severity = if value > threshold * 2.0 {
        DriftSeverity::Failure
    } else if value > threshold {
        DriftSeverity::Warning
    } else {
        return None;
    };

    Some(DriftAlert {
        severity,
        signal,
        message: format!(
            "{} divergence {:.4} exceeds threshold {:.2}",
            signal.as_str(),
            value,
            threshold
        ),
        threshold,
        value,
        generated_at,
    })
}
