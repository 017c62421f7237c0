//! Entity aggregation: flatten, group, and summarize classified records.
//!
//! Always a full recompute from the complete classification table — there
//! is no incremental merge. Callers needing continuity must resupply the
//! complete history each run.

use std::collections::BTreeMap;

use taxo_core::constants::UNKNOWN_PERIOD;
use taxo_core::{AggregationStatistic, FxHashMap, FxHashSet, IsoDate, RunConfig};

use super::types::{ClassifiedRecord, EntityProfile};

/// Rolls a flat classification table, keyed by entity id, into one profile
/// per entity.
pub struct EntityAggregator {
    config: RunConfig,
}

/// Per-entity accumulation state while flattening.
#[derive(Default)]
struct EntityAccum {
    entity_name: Option<String>,
    record_ids: FxHashSet<String>,
    categorized_ids: FxHashSet<String>,
    /// (category → every flattened score for that category).
    scores: FxHashMap<String, Vec<f64>>,
    dates: Vec<IsoDate>,
    /// Every period seen for this entity, categorized or not.
    periods: FxHashSet<String>,
    /// period → category → summed score mass.
    period_scores: FxHashMap<String, FxHashMap<String, f64>>,
}

impl EntityAggregator {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(RunConfig::default())
    }

    /// Aggregate the complete table into one profile per distinct entity
    /// id, sorted by entity id. Re-running on an unchanged table yields
    /// identical rows.
    pub fn aggregate(&self, rows: &[ClassifiedRecord]) -> Vec<EntityProfile> {
        let mut entities: BTreeMap<String, EntityAccum> = BTreeMap::new();

        for row in rows {
            // Entity ids pass through as-is, including empty strings.
            let accum = entities.entry(row.entity_id.clone()).or_default();
            Self::flatten_into(accum, row);
        }

        let profiles: Vec<EntityProfile> = entities
            .into_iter()
            .map(|(entity_id, accum)| self.build_profile(entity_id, accum))
            .collect();

        tracing::debug!(
            entities = profiles.len(),
            records = rows.len(),
            "aggregation complete"
        );
        profiles
    }

    /// Flatten one record into score tuples and bookkeeping counters.
    fn flatten_into(accum: &mut EntityAccum, row: &ClassifiedRecord) {
        let classification = &row.classification;
        accum.record_ids.insert(classification.record_id.clone());
        if accum.entity_name.is_none() {
            accum.entity_name = row.entity_name.clone();
        }

        let date = row.record_date.as_deref().and_then(IsoDate::parse);
        if let Some(d) = date {
            accum.dates.push(d);
        }

        let period = row
            .period_label
            .clone()
            .or_else(|| date.map(|d| d.year.to_string()))
            .unwrap_or_else(|| UNKNOWN_PERIOD.to_string());
        accum.periods.insert(period.clone());

        // One tuple for the primary (if present) plus one per supporting
        // pair. A record contributing zero tuples still counts toward the
        // coverage denominator via record_ids above.
        let mut tuples: Vec<(&str, f64)> = Vec::new();
        if let (Some(category), Some(score)) = (
            classification.primary_category.as_deref(),
            classification.primary_score,
        ) {
            tuples.push((category, score));
        }
        for assignment in &classification.supporting {
            tuples.push((assignment.category.as_str(), assignment.score));
        }

        if tuples.is_empty() {
            return;
        }
        accum
            .categorized_ids
            .insert(classification.record_id.clone());

        let period_bucket = accum.period_scores.entry(period).or_default();
        for (category, score) in tuples {
            accum
                .scores
                .entry(category.to_string())
                .or_default()
                .push(score);
            *period_bucket.entry(category.to_string()).or_insert(0.0) += score;
        }
    }

    fn build_profile(&self, entity_id: String, accum: EntityAccum) -> EntityProfile {
        let total_records = accum.record_ids.len();
        let records_with_category = accum.categorized_ids.len();
        let coverage = records_with_category as f64 / total_records.max(1) as f64;

        // Aggregate per category, then trim to top_n by score descending,
        // ties by category id ascending.
        let mut aggregated: Vec<(String, f64)> = accum
            .scores
            .into_iter()
            .map(|(category, values)| {
                let score = match self.config.aggregation_statistic {
                    AggregationStatistic::Mean => mean(&values),
                    AggregationStatistic::Median => median(values),
                };
                (category, score)
            })
            .collect();
        aggregated.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        aggregated.truncate(self.config.top_n_categories);

        let dominant = aggregated.first().cloned();
        let specialization_score = hhi(aggregated.iter().map(|(_, s)| *s));
        let category_scores: BTreeMap<String, f64> = aggregated.into_iter().collect();

        let first_record_date = accum.dates.iter().min().copied();
        let last_record_date = accum.dates.iter().max().copied();

        // Every period seen is present in the trend, even when no score
        // mass landed in it.
        let mut trend: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for period in accum.periods {
            let shares = accum
                .period_scores
                .get(&period)
                .map(|scores| normalize_shares(scores))
                .unwrap_or_default();
            trend.insert(period, shares);
        }

        EntityProfile {
            entity_id,
            entity_name: accum.entity_name,
            total_records,
            records_with_category,
            coverage,
            dominant_category: dominant.as_ref().map(|(c, _)| c.clone()),
            dominant_score: dominant.as_ref().map(|(_, s)| *s),
            specialization_score,
            category_scores,
            first_record_date,
            last_record_date,
            trend,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

/// Herfindahl-Hirschman index: sum of squared shares, 0.0 when the total
/// mass is zero.
fn hhi(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let sum: f64 = values.clone().sum();
    if sum <= 0.0 {
        return 0.0;
    }
    values.map(|v| (v / sum).powi(2)).sum()
}

/// Normalize a category→mass map to shares summing to 1; empty map when
/// the total is zero.
fn normalize_shares(scores: &FxHashMap<String, f64>) -> BTreeMap<String, f64> {
    let total: f64 = scores.values().sum();
    if total <= 0.0 {
        return BTreeMap::new();
    }
    scores
        .iter()
        .map(|(category, score)| (category.clone(), score / total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{CategoryAssignment, ClassificationRecord};
    use taxo_core::types::collections::SmallVec4;

    fn classification(
        record_id: &str,
        primary: Option<(&str, f64)>,
        supporting: &[(&str, f64)],
    ) -> ClassificationRecord {
        ClassificationRecord {
            record_id: record_id.to_string(),
            primary_category: primary.map(|(c, _)| c.to_string()),
            primary_score: primary.map(|(_, s)| s),
            supporting: supporting
                .iter()
                .map(|(c, s)| CategoryAssignment {
                    category: c.to_string(),
                    score: *s,
                })
                .collect::<SmallVec4<_>>(),
            evidence: Vec::new(),
            classified_at: 1_700_000_000,
            taxonomy_version: "v1".to_string(),
        }
    }

    fn row(
        entity: &str,
        record_id: &str,
        primary: Option<(&str, f64)>,
        supporting: &[(&str, f64)],
    ) -> ClassifiedRecord {
        ClassifiedRecord {
            entity_id: entity.to_string(),
            entity_name: None,
            record_date: None,
            period_label: None,
            classification: classification(record_id, primary, supporting),
        }
    }

    #[test]
    fn test_single_record_single_category() {
        let rows = vec![row("E1", "r1", Some(("a", 80.0)), &[])];
        let profiles = EntityAggregator::with_defaults().aggregate(&rows);

        assert_eq!(profiles.len(), 1);
        let p = &profiles[0];
        assert_eq!(p.entity_id, "E1");
        assert_eq!(p.total_records, 1);
        assert_eq!(p.records_with_category, 1);
        assert_eq!(p.coverage, 1.0);
        assert_eq!(p.dominant_category.as_deref(), Some("a"));
        assert_eq!(p.dominant_score, Some(80.0));
        assert_eq!(p.specialization_score, 1.0);
    }

    #[test]
    fn test_mean_aggregation_across_records() {
        let rows = vec![
            row("E1", "r1", Some(("a", 60.0)), &[]),
            row("E1", "r2", Some(("a", 80.0)), &[]),
        ];
        let profiles = EntityAggregator::with_defaults().aggregate(&rows);
        assert_eq!(profiles[0].category_scores["a"], 70.0);
    }

    #[test]
    fn test_median_aggregation() {
        let config = RunConfig {
            aggregation_statistic: AggregationStatistic::Median,
            ..RunConfig::default()
        };
        let rows = vec![
            row("E1", "r1", Some(("a", 10.0)), &[]),
            row("E1", "r2", Some(("a", 20.0)), &[]),
            row("E1", "r3", Some(("a", 90.0)), &[]),
        ];
        let profiles = EntityAggregator::new(config).aggregate(&rows);
        assert_eq!(profiles[0].category_scores["a"], 20.0);
    }

    #[test]
    fn test_supporting_pairs_flattened() {
        let rows = vec![row(
            "E1",
            "r1",
            Some(("a", 80.0)),
            &[("b", 40.0), ("c", 20.0)],
        )];
        let profiles = EntityAggregator::with_defaults().aggregate(&rows);
        let p = &profiles[0];
        assert_eq!(p.category_scores.len(), 3);
        assert_eq!(p.category_scores["b"], 40.0);
    }

    #[test]
    fn test_uncategorized_record_counts_in_denominator() {
        let rows = vec![
            row("E1", "r1", Some(("a", 80.0)), &[]),
            row("E1", "r2", None, &[]),
        ];
        let profiles = EntityAggregator::with_defaults().aggregate(&rows);
        let p = &profiles[0];
        assert_eq!(p.total_records, 2);
        assert_eq!(p.records_with_category, 1);
        assert_eq!(p.coverage, 0.5);
    }

    #[test]
    fn test_zero_categorized_entity_edge_case() {
        let rows = vec![row("E1", "r1", None, &[])];
        let profiles = EntityAggregator::with_defaults().aggregate(&rows);
        let p = &profiles[0];
        assert_eq!(p.coverage, 0.0);
        assert!(p.category_scores.is_empty());
        assert_eq!(p.dominant_category, None);
        assert_eq!(p.dominant_score, None);
        assert_eq!(p.specialization_score, 0.0);
        assert_eq!(p.trend.len(), 1, "trend period present");
        assert!(p.trend["unknown"].is_empty(), "period map empty");
    }

    #[test]
    fn test_hhi_equal_weights_is_one_over_n() {
        let rows = vec![row(
            "E1",
            "r1",
            Some(("a", 50.0)),
            &[("b", 50.0), ("c", 50.0), ("d", 50.0)],
        )];
        let profiles = EntityAggregator::with_defaults().aggregate(&rows);
        assert!(
            (profiles[0].specialization_score - 0.25).abs() < 1e-10,
            "4 equal categories → HHI 1/4, got {}",
            profiles[0].specialization_score
        );
    }

    #[test]
    fn test_top_n_trim_with_deterministic_ties() {
        let config = RunConfig {
            top_n_categories: 2,
            ..RunConfig::default()
        };
        let rows = vec![row(
            "E1",
            "r1",
            Some(("z", 50.0)),
            &[("a", 50.0), ("m", 50.0)],
        )];
        let profiles = EntityAggregator::new(config).aggregate(&rows);
        let p = &profiles[0];
        let kept: Vec<&str> = p.category_scores.keys().map(|s| s.as_str()).collect();
        assert_eq!(kept, vec!["a", "m"], "ties trim by category id ascending");
        assert_eq!(p.dominant_category.as_deref(), Some("a"));
    }

    #[test]
    fn test_dates_min_max_and_unparseable_ignored() {
        let mut r1 = row("E1", "r1", Some(("a", 50.0)), &[]);
        r1.record_date = Some("2019-06-01".to_string());
        let mut r2 = row("E1", "r2", Some(("a", 50.0)), &[]);
        r2.record_date = Some("not a date".to_string());
        let mut r3 = row("E1", "r3", Some(("a", 50.0)), &[]);
        r3.record_date = Some("2022-01-15".to_string());

        let profiles = EntityAggregator::with_defaults().aggregate(&[r1, r2, r3]);
        let p = &profiles[0];
        assert_eq!(p.first_record_date.unwrap().to_string(), "2019-06-01");
        assert_eq!(p.last_record_date.unwrap().to_string(), "2022-01-15");
    }

    #[test]
    fn test_trend_periods_from_label_year_and_unknown() {
        let mut r1 = row("E1", "r1", Some(("a", 50.0)), &[]);
        r1.period_label = Some("phase-1".to_string());
        r1.record_date = Some("2019-06-01".to_string());
        let mut r2 = row("E1", "r2", Some(("b", 50.0)), &[]);
        r2.record_date = Some("2020-03-01".to_string());
        let r3 = row("E1", "r3", Some(("c", 50.0)), &[]);

        let profiles = EntityAggregator::with_defaults().aggregate(&[r1, r2, r3]);
        let p = &profiles[0];
        let periods: Vec<&str> = p.trend.keys().map(|s| s.as_str()).collect();
        assert_eq!(periods, vec!["2020", "phase-1", "unknown"]);
    }

    #[test]
    fn test_trend_shares_sum_to_one() {
        let mut r1 = row("E1", "r1", Some(("a", 60.0)), &[("b", 20.0)]);
        r1.record_date = Some("2021-01-01".to_string());
        let mut r2 = row("E1", "r2", Some(("b", 20.0)), &[]);
        r2.record_date = Some("2021-05-05".to_string());

        let profiles = EntityAggregator::with_defaults().aggregate(&[r1, r2]);
        let shares = &profiles[0].trend["2021"];
        let total: f64 = shares.values().sum();
        assert!((total - 1.0).abs() < 1e-10);
        assert!((shares["a"] - 0.6).abs() < 1e-10);
        assert!((shares["b"] - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_output_sorted_by_entity_id_and_idempotent() {
        let rows = vec![
            row("E2", "r1", Some(("a", 50.0)), &[]),
            row("E1", "r2", Some(("b", 60.0)), &[]),
            row("E3", "r3", None, &[]),
        ];
        let aggregator = EntityAggregator::with_defaults();
        let first = aggregator.aggregate(&rows);
        let second = aggregator.aggregate(&rows);

        let ids: Vec<&str> = first.iter().map(|p| p.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E2", "E3"]);
        assert_eq!(first, second, "aggregation must be idempotent");
    }

    #[test]
    fn test_empty_entity_id_preserved() {
        let rows = vec![row("", "r1", Some(("a", 50.0)), &[])];
        let profiles = EntityAggregator::with_defaults().aggregate(&rows);
        assert_eq!(profiles[0].entity_id, "");
    }

    #[test]
    fn test_duplicate_record_ids_counted_once() {
        let rows = vec![
            row("E1", "r1", Some(("a", 50.0)), &[]),
            row("E1", "r1", Some(("a", 70.0)), &[]),
        ];
        let profiles = EntityAggregator::with_defaults().aggregate(&rows);
        assert_eq!(profiles[0].total_records, 1);
        assert_eq!(profiles[0].records_with_category, 1);
    }

    #[test]
    fn test_median_helper() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![5.0]), 5.0);
        assert_eq!(median(vec![1.0, 3.0]), 2.0);
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
    }
}
