//! Classifier contract tests: batch shape, determinism, ranked ordering,
//! and the keyword end-to-end scenario.

use std::sync::Arc;

use taxo_analysis::{
    Area, Classifier, EntityAggregator, ClassifiedRecord, ModelDescriptor, SourceRecord,
    Taxonomy,
};
use taxo_core::RunConfig;

fn make_area(id: &str, keyword: &str) -> Area {
    Area {
        id: id.to_string(),
        name: id.to_uppercase(),
        definition: String::new(),
        keywords: vec![keyword.to_string()],
        parent_id: None,
        version: "v1".to_string(),
    }
}

fn make_classifier(areas: Vec<Area>) -> Classifier {
    let taxonomy = Arc::new(Taxonomy::new("v1", areas));
    let descriptor = ModelDescriptor::from_taxonomy(&taxonomy, "test-model", 1_700_000_000);
    Classifier::from_model(taxonomy, &descriptor, RunConfig::default())
}

fn record(id: &str, text: &str) -> SourceRecord {
    SourceRecord {
        id: id.to_string(),
        title: String::new(),
        abstract_text: text.to_string(),
        keywords: Vec::new(),
    }
}

#[test]
fn test_batch_length_contract_holds_for_any_input() {
    let classifier = make_classifier(vec![make_area("a", "foo"), make_area("b", "bar")]);

    assert!(classifier.classify_batch(&[], 3).is_empty());

    let records: Vec<SourceRecord> = (0..25)
        .map(|i| record(&format!("r{i}"), if i % 2 == 0 { "foo" } else { "" }))
        .collect();
    assert_eq!(classifier.classify_batch(&records, 3).len(), 25);
}

#[test]
fn test_ranked_output_sorted_with_no_repeats() {
    let classifier = make_classifier(vec![
        make_area("a", "foo"),
        make_area("b", "bar"),
        make_area("c", "baz"),
    ]);
    let ranked = classifier.classify_batch(&[record("r1", "foo bar baz bar")], 3);

    let list = &ranked[0];
    for pair in list.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "scores must be sorted descending"
        );
        if pair[0].score == pair[1].score {
            assert!(pair[0].category < pair[1].category, "ties break by id");
        }
    }
    let mut ids: Vec<&str> = list.iter().map(|a| a.category.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), list.len(), "no category repeats within a record");
}

#[test]
fn test_single_signal_end_to_end() {
    // Taxonomy {A: "foo", B: "bar"}; record text "foo foo" → top-2 is
    // [{A, score>0}, {B, score==0}].
    let classifier = make_classifier(vec![make_area("A", "foo"), make_area("B", "bar")]);
    let ranked = classifier.classify_batch(&[record("award-1", "foo foo")], 2);

    assert_eq!(ranked[0].len(), 2);
    assert_eq!(ranked[0][0].category, "A");
    assert!(ranked[0][0].score > 0.0);
    assert_eq!(ranked[0][1].category, "B");
    assert_eq!(ranked[0][1].score, 0.0);
}

#[test]
fn test_single_signal_aggregates_to_specialized_profile() {
    // Aggregating the one-award result for entity E1 yields dominant A,
    // full coverage, and full specialization.
    let classifier = make_classifier(vec![make_area("A", "foo"), make_area("B", "bar")]);
    let run = classifier.classify_records_at(&[record("award-1", "foo foo")], 1_700_000_000);
    assert!(run.ok);

    let rows: Vec<ClassifiedRecord> = run
        .records
        .into_iter()
        .map(|classification| ClassifiedRecord {
            entity_id: "E1".to_string(),
            entity_name: None,
            record_date: None,
            period_label: None,
            classification,
        })
        .collect();

    let profiles = EntityAggregator::with_defaults().aggregate(&rows);
    assert_eq!(profiles.len(), 1);
    let p = &profiles[0];
    assert_eq!(p.dominant_category.as_deref(), Some("A"));
    assert_eq!(p.coverage, 1.0);
    assert_eq!(p.specialization_score, 1.0);
}

#[test]
fn test_classification_consumes_title_abstract_and_keywords() {
    let classifier = make_classifier(vec![make_area("a", "photonics")]);

    let from_title = SourceRecord {
        id: "r1".to_string(),
        title: "Advances in photonics".to_string(),
        abstract_text: String::new(),
        keywords: Vec::new(),
    };
    let from_keywords = SourceRecord {
        id: "r2".to_string(),
        title: String::new(),
        abstract_text: String::new(),
        keywords: vec!["photonics".to_string()],
    };

    let ranked = classifier.classify_batch(&[from_title, from_keywords], 1);
    assert!(ranked[0][0].score > 0.0);
    assert!(ranked[1][0].score > 0.0);
}

#[test]
fn test_repeat_runs_are_deterministic() {
    let areas: Vec<Area> = (0..12)
        .map(|i| make_area(&format!("cat{i:02}"), &format!("term{i}")))
        .collect();
    let classifier = make_classifier(areas);

    let records: Vec<SourceRecord> = (0..40)
        .map(|i| record(&format!("r{i}"), &format!("term{} term{}", i % 12, (i + 3) % 12)))
        .collect();

    let first = classifier.classify_batch(&records, 3);
    let second = classifier.classify_batch(&records, 3);
    assert_eq!(
        first, second,
        "parallel category scoring must merge deterministically"
    );
}
