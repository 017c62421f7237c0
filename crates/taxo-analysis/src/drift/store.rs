//! Drift artifact persistence.
//!
//! The baseline is a versioned key-value entry (key = taxonomy or model
//! version) with explicit read-then-write promotion — never an implicit
//! "does the file exist" check. Concurrent promotions are last-writer-wins;
//! serializing them is the caller's responsibility.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use taxo_core::{DriftError, FxHashMap};

use super::types::{DistributionSnapshot, DriftAlerts, DriftReport};

/// Persistence seam for the drift monitor.
pub trait DriftStore: Send + Sync {
    /// Read the baseline snapshot stored under `key`, if any.
    fn load_baseline(&self, key: &str) -> Result<Option<DistributionSnapshot>, DriftError>;

    /// Overwrite the baseline under `key` with `snapshot`.
    fn promote_baseline(
        &self,
        key: &str,
        snapshot: &DistributionSnapshot,
    ) -> Result<(), DriftError>;

    /// Persist the per-run report artifact.
    fn write_report(&self, report: &DriftReport) -> Result<(), DriftError>;

    /// Persist the per-run alert list artifact, separate from the report.
    fn write_alerts(&self, alerts: &DriftAlerts) -> Result<(), DriftError>;
}

/// JSON-file store: one baseline artifact per key plus the two per-run
/// artifacts, all under one directory.
pub struct JsonDriftStore {
    dir: PathBuf,
}

impl JsonDriftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn baseline_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        self.dir.join(format!("baseline-{safe}.json"))
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), DriftError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| DriftError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        let raw = serde_json::to_string_pretty(value)?;
        std::fs::write(path, raw).map_err(|source| DriftError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

impl DriftStore for JsonDriftStore {
    fn load_baseline(&self, key: &str) -> Result<Option<DistributionSnapshot>, DriftError> {
        let path = self.baseline_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| DriftError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn promote_baseline(
        &self,
        key: &str,
        snapshot: &DistributionSnapshot,
    ) -> Result<(), DriftError> {
        self.write_json(&self.baseline_path(key), snapshot)
    }

    fn write_report(&self, report: &DriftReport) -> Result<(), DriftError> {
        self.write_json(&self.dir.join("drift-report.json"), report)
    }

    fn write_alerts(&self, alerts: &DriftAlerts) -> Result<(), DriftError> {
        self.write_json(&self.dir.join("drift-alerts.json"), alerts)
    }
}

/// In-memory store for tests and single-run usage.
#[derive(Default)]
pub struct InMemoryDriftStore {
    baselines: Mutex<FxHashMap<String, DistributionSnapshot>>,
    reports: Mutex<Vec<DriftReport>>,
    alerts: Mutex<Vec<DriftAlerts>>,
}

impl InMemoryDriftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports written so far (most recent last).
    pub fn reports(&self) -> Vec<DriftReport> {
        self.reports.lock().unwrap().clone()
    }

    /// Alert artifacts written so far (most recent last).
    pub fn alert_artifacts(&self) -> Vec<DriftAlerts> {
        self.alerts.lock().unwrap().clone()
    }
}

impl DriftStore for InMemoryDriftStore {
    fn load_baseline(&self, key: &str) -> Result<Option<DistributionSnapshot>, DriftError> {
        Ok(self.baselines.lock().unwrap().get(key).cloned())
    }

    fn promote_baseline(
        &self,
        key: &str,
        snapshot: &DistributionSnapshot,
    ) -> Result<(), DriftError> {
        self.baselines
            .lock()
            .unwrap()
            .insert(key.to_string(), snapshot.clone());
        Ok(())
    }

    fn write_report(&self, report: &DriftReport) -> Result<(), DriftError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    fn write_alerts(&self, alerts: &DriftAlerts) -> Result<(), DriftError> {
        self.alerts.lock().unwrap().push(alerts.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn snapshot(generated_at: i64) -> DistributionSnapshot {
        let mut category_pmf = BTreeMap::new();
        category_pmf.insert("a".to_string(), 1.0);
        DistributionSnapshot {
            category_pmf,
            score_pmf: BTreeMap::new(),
            generated_at,
        }
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDriftStore::new(dir.path());

        assert!(store.load_baseline("2024.1").unwrap().is_none());
        store.promote_baseline("2024.1", &snapshot(42)).unwrap();

        let loaded = store.load_baseline("2024.1").unwrap().unwrap();
        assert_eq!(loaded.generated_at, 42);
        assert_eq!(loaded.category_pmf["a"], 1.0);
    }

    #[test]
    fn test_json_store_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDriftStore::new(dir.path());

        store.promote_baseline("2024.1", &snapshot(1)).unwrap();
        assert!(store.load_baseline("2024.2").unwrap().is_none());

        store.promote_baseline("2024.2", &snapshot(2)).unwrap();
        assert_eq!(store.load_baseline("2024.1").unwrap().unwrap().generated_at, 1);
        assert_eq!(store.load_baseline("2024.2").unwrap().unwrap().generated_at, 2);
    }

    #[test]
    fn test_promotion_overwrites() {
        let store = InMemoryDriftStore::new();
        store.promote_baseline("v1", &snapshot(1)).unwrap();
        store.promote_baseline("v1", &snapshot(2)).unwrap();
        assert_eq!(store.load_baseline("v1").unwrap().unwrap().generated_at, 2);
    }

    #[test]
    fn test_report_and_alerts_are_separate_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDriftStore::new(dir.path());

        let report = DriftReport {
            generated_at: 1,
            status: "ok".to_string(),
            label_js_divergence: Some(0.05),
            score_js_divergence: Some(0.01),
            label_threshold: 0.10,
            score_threshold: 0.15,
        };
        store.write_report(&report).unwrap();
        store
            .write_alerts(&DriftAlerts {
                generated_at: 1,
                alerts: Vec::new(),
            })
            .unwrap();

        assert!(dir.path().join("drift-report.json").exists());
        assert!(dir.path().join("drift-alerts.json").exists());
    }
}
