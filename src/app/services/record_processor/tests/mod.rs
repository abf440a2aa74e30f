//! Tests for record processor module
//!
//! This module provides unit tests for deduplication, aggregation and the
//! processing pipeline.

pub mod aggregation_tests;
pub mod deduplication_tests;

// Test helper functions and fixtures
use crate::app::models::{Course, Gender, Stroke, SwimEventRecord, TimeType};
use chrono::NaiveDate;

/// Create a 100 Free record for a 12 year old girl
pub fn create_test_record(name: &str, baseline_time: f64, time_dropped: f64) -> SwimEventRecord {
    SwimEventRecord {
        swimmer_name: name.to_string(),
        age: 12,
        gender: Gender::Female,
        course: Course::ShortCourseYards,
        time_type: TimeType::Final,
        distance: 100,
        stroke: Stroke::Free,
        event_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        meet_name: "Summer Invitational".to_string(),
        time_dropped,
        baseline_time,
    }
}

/// Same swimmer, different event
pub fn create_event_record(
    name: &str,
    distance: u32,
    stroke: Stroke,
    baseline_time: f64,
    time_dropped: f64,
) -> SwimEventRecord {
    SwimEventRecord {
        distance,
        stroke,
        ..create_test_record(name, baseline_time, time_dropped)
    }
}

/// Copy of a record listed under another meet on another day
pub fn relisted_at(record: &SwimEventRecord, meet: &str) -> SwimEventRecord {
    SwimEventRecord {
        meet_name: meet.to_string(),
        event_date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
        time_type: TimeType::Prelim,
        course: Course::LongCourseMeters,
        ..record.clone()
    }
}

/// Approximate float comparison
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
