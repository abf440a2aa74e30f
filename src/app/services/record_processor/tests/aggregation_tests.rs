//! Tests for per-swimmer aggregation

use super::*;
use crate::app::services::record_processor::aggregation::{
    aggregate_improvements, rank_by_average_percentage, summarize_swimmer,
};
use crate::constants::DEFAULT_NORMALIZATION_DIVISOR;

#[test]
fn test_total_and_fastest_time_dropped() {
    let records = vec![
        create_event_record("Doe, Jane", 50, Stroke::Free, 30.0, -1.2),
        create_event_record("Doe, Jane", 100, Stroke::Free, 65.0, -0.5),
        create_event_record("Doe, Jane", 100, Stroke::Back, 72.0, -0.3),
    ];

    let reports = aggregate_improvements(&records, DEFAULT_NORMALIZATION_DIVISOR);

    assert_eq!(reports.len(), 1);
    assert_close(reports[0].total_time_dropped, -2.0);
    assert_close(reports[0].fastest_time_dropped, -1.2);
}

#[test]
fn test_average_percentage_uses_ratio_mean() {
    let records = vec![
        create_event_record("Doe, Jane", 50, Stroke::Free, 50.0, -1.0),
        create_event_record("Doe, Jane", 100, Stroke::Free, 100.0, -2.0),
    ];

    let reports = aggregate_improvements(&records, DEFAULT_NORMALIZATION_DIVISOR);

    assert_close(reports[0].average_percentage_time_dropped, -2.0);
    assert_close(reports[0].total_percentage_time_dropped, -4.0 / 5.0);
}

#[test]
fn test_total_percentage_follows_divisor() {
    let records = vec![
        create_event_record("Doe, Jane", 50, Stroke::Free, 50.0, -1.0),
        create_event_record("Doe, Jane", 100, Stroke::Free, 100.0, -2.0),
    ];

    let by_five = aggregate_improvements(&records, 5.0);
    let by_two = aggregate_improvements(&records, 2.0);

    assert_close(by_five[0].total_percentage_time_dropped, -0.8);
    assert_close(by_two[0].total_percentage_time_dropped, -2.0);
    assert_close(
        by_five[0].average_percentage_time_dropped,
        by_two[0].average_percentage_time_dropped,
    );
}

#[test]
fn test_single_record_report() {
    let records = vec![create_test_record("Roe, Anna", 80.0, -4.0)];

    let reports = aggregate_improvements(&records, DEFAULT_NORMALIZATION_DIVISOR);

    let report = &reports[0];
    assert_eq!(report.name, "Roe, Anna");
    assert_eq!(report.age, 12);
    assert_eq!(report.gender, Gender::Female);
    assert_close(report.total_time_dropped, -4.0);
    assert_close(report.fastest_time_dropped, -4.0);
    assert_close(report.average_percentage_time_dropped, -5.0);
    assert_close(report.total_percentage_time_dropped, -1.0);
}

#[test]
fn test_one_report_per_name_ordered_by_name() {
    let records = vec![
        create_test_record("Zane, Zoe", 60.0, -1.0),
        create_test_record("Doe, Jane", 65.0, -1.0),
        create_event_record("Zane, Zoe", 50, Stroke::Fly, 31.0, -0.4),
        create_test_record("Alder, Amy", 70.0, -0.2),
    ];

    let reports = aggregate_improvements(&records, DEFAULT_NORMALIZATION_DIVISOR);
    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();

    assert_eq!(names, vec!["Alder, Amy", "Doe, Jane", "Zane, Zoe"]);
    assert_close(reports[2].total_time_dropped, -1.4);
}

#[test]
fn test_age_and_gender_come_from_first_record() {
    let mut older = create_event_record("Doe, Jane", 200, Stroke::Breast, 180.0, -2.0);
    older.age = 13;

    let records = vec![create_test_record("Doe, Jane", 65.0, -1.0), older];
    let reports = aggregate_improvements(&records, DEFAULT_NORMALIZATION_DIVISOR);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].age, 12);
}

#[test]
fn test_positive_deltas_are_kept() {
    let records = vec![
        create_event_record("Doe, Jane", 50, Stroke::Free, 30.0, 0.5),
        create_event_record("Doe, Jane", 100, Stroke::Free, 65.0, 0.25),
    ];

    let reports = aggregate_improvements(&records, DEFAULT_NORMALIZATION_DIVISOR);

    assert_close(reports[0].total_time_dropped, 0.75);
    assert_close(reports[0].fastest_time_dropped, 0.25);
}

#[test]
fn test_empty_input_yields_no_reports() {
    assert!(aggregate_improvements(&[], DEFAULT_NORMALIZATION_DIVISOR).is_empty());
    assert!(summarize_swimmer(&[], DEFAULT_NORMALIZATION_DIVISOR).is_none());
}

#[test]
fn test_rank_by_average_percentage() {
    let records = vec![
        create_test_record("Alder, Amy", 100.0, -1.0),
        create_test_record("Doe, Jane", 100.0, -3.0),
        create_test_record("Roe, Anna", 100.0, 0.5),
    ];

    let reports = aggregate_improvements(&records, DEFAULT_NORMALIZATION_DIVISOR);
    let ranked: Vec<&str> = rank_by_average_percentage(&reports)
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();

    assert_eq!(ranked, vec!["Doe, Jane", "Alder, Amy", "Roe, Anna"]);
}
