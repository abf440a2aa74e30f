//! Tests for record deduplication functionality

use super::*;
use crate::app::services::record_processor::deduplication::{
    analyze_duplicate_patterns, are_duplicates, deduplicate_records, get_deduplication_metrics,
};
use crate::app::services::record_processor::stats::ProcessingStats;

#[test]
fn test_deduplicate_records_no_duplicates() {
    let mut stats = ProcessingStats::new();

    let records = vec![
        create_test_record("Doe, Jane", 65.32, -1.25),
        create_test_record("Roe, Anna", 70.10, -0.50),
        create_event_record("Doe, Jane", 50, Stroke::Back, 33.01, -0.20),
    ];

    let result = deduplicate_records(records.clone(), &mut stats);

    assert_eq!(result, records);
    assert_eq!(stats.duplicates_removed, 0);
}

#[test]
fn test_relisted_swim_keeps_first_occurrence() {
    let mut stats = ProcessingStats::new();

    let original = create_test_record("Doe, Jane", 65.32, -1.25);
    let relisted = relisted_at(&original, "Long Course Champs");

    let result = deduplicate_records(vec![original.clone(), relisted], &mut stats);

    assert_eq!(result, vec![original]);
    assert_eq!(stats.duplicates_removed, 1);
}

#[test]
fn test_deduplication_is_stable() {
    let mut stats = ProcessingStats::new();

    let a = create_test_record("Doe, Jane", 65.32, -1.25);
    let b = create_test_record("Roe, Anna", 70.10, -0.50);
    let c = create_event_record("Doe, Jane", 200, Stroke::IndividualMedley, 160.0, -3.0);

    let input = vec![
        a.clone(),
        b.clone(),
        relisted_at(&a, "Other Meet"),
        c.clone(),
        relisted_at(&b, "Other Meet"),
    ];

    let result = deduplicate_records(input, &mut stats);

    assert_eq!(result, vec![a, b, c]);
    assert_eq!(stats.duplicates_removed, 2);
}

#[test]
fn test_deduplication_is_idempotent() {
    let mut stats = ProcessingStats::new();

    let a = create_test_record("Doe, Jane", 65.32, -1.25);
    let input = vec![
        a.clone(),
        relisted_at(&a, "Other Meet"),
        create_test_record("Roe, Anna", 70.10, -0.50),
    ];

    let once = deduplicate_records(input, &mut stats);
    let twice = deduplicate_records(once.clone(), &mut stats);

    assert_eq!(once, twice);
    assert_eq!(stats.duplicates_removed, 1);
}

#[test]
fn test_baseline_time_is_part_of_identity() {
    let mut stats = ProcessingStats::new();

    let earlier = create_test_record("Doe, Jane", 65.32, -1.25);
    let later = create_test_record("Doe, Jane", 64.07, -1.25);

    let result = deduplicate_records(vec![earlier, later], &mut stats);
    assert_eq!(result.len(), 2);
}

#[test]
fn test_delta_is_not_part_of_identity() {
    let first = create_test_record("Doe, Jane", 65.32, -1.25);
    let second = create_test_record("Doe, Jane", 65.32, -0.75);

    assert!(are_duplicates(&first, &second));
}

#[test]
fn test_name_spelling_is_part_of_identity() {
    let first = create_test_record("Doe, Jane", 65.32, -1.25);
    let second = create_test_record("Doe,  Jane", 65.32, -1.25);

    assert!(!are_duplicates(&first, &second));
}

#[test]
fn test_deduplicate_empty_input() {
    let mut stats = ProcessingStats::new();
    let result = deduplicate_records(Vec::new(), &mut stats);

    assert!(result.is_empty());
    assert_eq!(stats.duplicates_removed, 0);
}

#[test]
fn test_analyze_duplicate_patterns() {
    let a = create_test_record("Doe, Jane", 65.32, -1.25);
    let b = create_test_record("Roe, Anna", 70.10, -0.50);

    let records = vec![
        a.clone(),
        relisted_at(&a, "Meet Two"),
        relisted_at(&a, "Meet Three"),
        b,
    ];

    let (total_groups, duplicate_groups, total_duplicates) = analyze_duplicate_patterns(&records);

    assert_eq!(total_groups, 2);
    assert_eq!(duplicate_groups, 1);
    assert_eq!(total_duplicates, 2);
}

#[test]
fn test_get_deduplication_metrics() {
    let (percentage, removed) = get_deduplication_metrics(100, 80);
    assert_close(percentage, 20.0);
    assert_eq!(removed, 20);

    let (percentage, removed) = get_deduplication_metrics(0, 0);
    assert_close(percentage, 0.0);
    assert_eq!(removed, 0);
}
