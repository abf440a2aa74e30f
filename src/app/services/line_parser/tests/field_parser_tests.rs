//! Tests for individual field normalization

use super::assert_close;
use crate::app::models::{Course, Gender, Stroke, TimeType};
use crate::app::services::line_parser::field_parsers::*;
use chrono::NaiveDate;

#[test]
fn test_parse_duration_with_minutes() {
    assert_close(parse_duration("1:05.32").unwrap(), 65.32);
    assert_close(parse_duration("10:00.00").unwrap(), 600.0);
    assert_close(parse_duration("1:05.3").unwrap(), 65.3);
}

#[test]
fn test_parse_duration_seconds_only() {
    assert_close(parse_duration("58.75").unwrap(), 58.75);
    assert_close(parse_duration("5.5").unwrap(), 5.5);
    assert_close(parse_duration("29.123456").unwrap(), 29.123456);
}

#[test]
fn test_parse_duration_ignores_unofficial_marker() {
    assert_eq!(parse_duration("x58.75"), parse_duration("58.75"));
    assert_eq!(parse_duration("x1:05.32"), parse_duration("1:05.32"));
    assert!(parse_duration("xx58.75").is_err());
}

#[test]
fn test_parse_duration_rejects_malformed() {
    for token in [
        "", "58", "58.", ".75", "1:05", "60.00", "1:60.00", "60:00.00", "100:00.00",
        "0.00", "0:00.0", "58.1234567", "1.05.32", "-58.75", "58,75", "abc",
    ] {
        assert!(
            matches!(parse_duration(token), Err(FieldError::Duration(_))),
            "'{}' should be rejected",
            token
        );
    }
}

#[test]
fn test_parse_distance_multiples_of_25() {
    for distance in 1..=1000u32 {
        let result = parse_distance(&distance.to_string());
        if distance % 25 == 0 {
            assert_eq!(result, Ok(distance));
        } else {
            assert!(result.is_err(), "{} should be rejected", distance);
        }
    }
}

#[test]
fn test_parse_distance_rejects_non_positive_and_text() {
    assert!(matches!(parse_distance("0"), Err(FieldError::Distance(_))));
    assert!(matches!(parse_distance("-25"), Err(FieldError::Distance(_))));
    assert!(matches!(parse_distance("100m"), Err(FieldError::Distance(_))));
    assert!(matches!(parse_distance(""), Err(FieldError::Distance(_))));
}

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("6/15/2024").unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    );
    assert_eq!(
        parse_date("06/05/2024").unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
    );
}

#[test]
fn test_parse_date_rejects_invalid() {
    for token in ["13/01/2024", "2/30/2024", "6/15/24", "2024-06-15", "6-15-2024", ""] {
        assert!(
            matches!(parse_date(token), Err(FieldError::Date(_))),
            "'{}' should be rejected",
            token
        );
    }
}

#[test]
fn test_parse_delta() {
    assert_close(parse_delta("-1.25").unwrap(), -1.25);
    assert_close(parse_delta("+0.50").unwrap(), 0.5);
    assert_close(parse_delta("2").unwrap(), 2.0);

    assert!(matches!(parse_delta("NaN"), Err(FieldError::Delta(_))));
    assert!(matches!(parse_delta("inf"), Err(FieldError::Delta(_))));
    assert!(matches!(parse_delta("-1.2.3"), Err(FieldError::Delta(_))));
}

#[test]
fn test_parse_codes() {
    assert_eq!(parse_gender("M"), Ok(Gender::Male));
    assert_eq!(parse_course("L"), Ok(Course::LongCourseMeters));
    assert_eq!(parse_time_type("P"), Ok(TimeType::Prelim));
    assert_eq!(parse_stroke("IM"), Ok(Stroke::IndividualMedley));

    assert_eq!(parse_gender("X"), Err(FieldError::Gender("X".to_string())));
    assert_eq!(parse_course("M"), Err(FieldError::Course("M".to_string())));
    assert_eq!(parse_time_type("Q"), Err(FieldError::TimeType("Q".to_string())));
    assert_eq!(parse_stroke("Medley"), Err(FieldError::Stroke("Medley".to_string())));
}

#[test]
fn test_parse_age() {
    assert_eq!(parse_age("12"), Ok(12));
    assert!(matches!(parse_age("-1"), Err(FieldError::Age(_))));
    assert!(matches!(parse_age("twelve"), Err(FieldError::Age(_))));
}

#[test]
fn test_parse_text() {
    assert_eq!(parse_text("Summer Open", "meet name"), Ok("Summer Open"));
    assert_eq!(parse_text("   ", "meet name"), Err(FieldError::Empty("meet name")));
}

#[test]
fn test_field_error_names_field() {
    assert_eq!(FieldError::Duration("x".into()).field(), "baseline time");
    assert_eq!(FieldError::Delta("x".into()).field(), "time dropped");
    assert_eq!(FieldError::Empty("meet name").field(), "meet name");
    assert_eq!(
        FieldError::Distance("110".into()).to_string(),
        "invalid distance '110': expected a positive multiple of 25"
    );
}
