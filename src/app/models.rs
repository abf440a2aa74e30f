//! Data models for swim improvement processing
//!
//! This module contains the core data structures for representing swimmers,
//! their improvement records and the per-swimmer improvement report, along
//! with the coded vocabularies (gender, course, time type, stroke) used in
//! meet-results documents.

use crate::app::services::line_parser::field_parsers::{
    self, FieldError, FieldResult, RawEventFields,
};
use crate::constants::DISTANCE_UNIT;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Coded Vocabularies
// =============================================================================

/// Swimmer gender as printed next to the age in swimmer headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Single-letter code used in documents and output tables
    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = FieldError;

    fn from_str(s: &str) -> FieldResult<Self> {
        match s {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            _ => Err(FieldError::Gender(s.to_string())),
        }
    }
}

/// Pool length standard a time was swum under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    /// Short course meters
    #[serde(rename = "S")]
    ShortCourseMeters,
    /// Short course yards
    #[serde(rename = "Y")]
    ShortCourseYards,
    /// Long course meters
    #[serde(rename = "L")]
    LongCourseMeters,
}

impl Course {
    pub fn code(self) -> &'static str {
        match self {
            Course::ShortCourseMeters => "S",
            Course::ShortCourseYards => "Y",
            Course::LongCourseMeters => "L",
        }
    }
}

impl FromStr for Course {
    type Err = FieldError;

    fn from_str(s: &str) -> FieldResult<Self> {
        match s {
            "S" => Ok(Course::ShortCourseMeters),
            "Y" => Ok(Course::ShortCourseYards),
            "L" => Ok(Course::LongCourseMeters),
            _ => Err(FieldError::Course(s.to_string())),
        }
    }
}

/// Session in which the time was swum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeType {
    #[serde(rename = "P")]
    Prelim,
    #[serde(rename = "F")]
    Final,
    /// Timed final or standalone swim
    #[serde(rename = "S")]
    Single,
}

impl TimeType {
    pub fn code(self) -> &'static str {
        match self {
            TimeType::Prelim => "P",
            TimeType::Final => "F",
            TimeType::Single => "S",
        }
    }
}

impl FromStr for TimeType {
    type Err = FieldError;

    fn from_str(s: &str) -> FieldResult<Self> {
        match s {
            "P" => Ok(TimeType::Prelim),
            "F" => Ok(TimeType::Final),
            "S" => Ok(TimeType::Single),
            _ => Err(FieldError::TimeType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stroke {
    Free,
    Back,
    Breast,
    Fly,
    #[serde(rename = "IM")]
    IndividualMedley,
}

impl Stroke {
    pub fn code(self) -> &'static str {
        match self {
            Stroke::Free => "Free",
            Stroke::Back => "Back",
            Stroke::Breast => "Breast",
            Stroke::Fly => "Fly",
            Stroke::IndividualMedley => "IM",
        }
    }
}

impl FromStr for Stroke {
    type Err = FieldError;

    fn from_str(s: &str) -> FieldResult<Self> {
        match s {
            "Free" => Ok(Stroke::Free),
            "Back" => Ok(Stroke::Back),
            "Breast" => Ok(Stroke::Breast),
            "Fly" => Ok(Stroke::Fly),
            "IM" => Ok(Stroke::IndividualMedley),
            _ => Err(FieldError::Stroke(s.to_string())),
        }
    }
}

macro_rules! display_as_code {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        })*
    };
}

display_as_code!(Gender, Course, TimeType, Stroke);

// =============================================================================
// Swimmer Context
// =============================================================================

/// Identity of the swimmer whose block is currently being read
///
/// Lives only for the duration of a single parse pass and is replaced every
/// time a new swimmer header line is recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwimmerContext {
    /// Name as printed, usually "Last, First"
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}

impl SwimmerContext {
    /// Build a context from raw header tokens, validating age and gender
    pub fn from_raw(name: &str, age: &str, gender: &str) -> FieldResult<Self> {
        Ok(Self {
            name: field_parsers::parse_text(name, "swimmer name")?.to_string(),
            age: field_parsers::parse_age(age)?,
            gender: field_parsers::parse_gender(gender)?,
        })
    }
}

// =============================================================================
// Improvement Record
// =============================================================================

/// One observed improvement for a swimmer in a single event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwimEventRecord {
    pub swimmer_name: String,
    pub age: u32,
    pub gender: Gender,
    pub course: Course,
    pub time_type: TimeType,
    /// Event distance, always a positive multiple of 25
    pub distance: u32,
    pub stroke: Stroke,
    pub event_date: NaiveDate,
    pub meet_name: String,
    /// Signed improvement delta in seconds
    pub time_dropped: f64,
    /// Reference time in elapsed seconds
    pub baseline_time: f64,
}

impl SwimEventRecord {
    /// Create a new record with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        swimmer_name: String,
        age: u32,
        gender: Gender,
        course: Course,
        time_type: TimeType,
        distance: u32,
        stroke: Stroke,
        event_date: NaiveDate,
        meet_name: String,
        time_dropped: f64,
        baseline_time: f64,
    ) -> FieldResult<Self> {
        let record = Self {
            swimmer_name,
            age,
            gender,
            course,
            time_type,
            distance,
            stroke,
            event_date,
            meet_name,
            time_dropped,
            baseline_time,
        };

        record.validate()?;
        Ok(record)
    }

    /// Normalize the raw tokens of an event row and attach the swimmer context
    pub fn from_raw(context: &SwimmerContext, raw: &RawEventFields) -> FieldResult<Self> {
        Self::new(
            context.name.clone(),
            context.age,
            context.gender,
            field_parsers::parse_course(&raw.course)?,
            field_parsers::parse_time_type(&raw.time_type)?,
            field_parsers::parse_distance(&raw.distance)?,
            field_parsers::parse_stroke(&raw.stroke)?,
            field_parsers::parse_date(&raw.date)?,
            field_parsers::parse_text(&raw.meet, "meet name")?.to_string(),
            field_parsers::parse_delta(&raw.time_dropped)?,
            field_parsers::parse_duration(&raw.baseline_time)?,
        )
    }

    /// Check the invariants that typed fields cannot express on their own
    pub fn validate(&self) -> FieldResult<()> {
        if self.swimmer_name.trim().is_empty() {
            return Err(FieldError::Empty("swimmer name"));
        }

        if self.meet_name.trim().is_empty() {
            return Err(FieldError::Empty("meet name"));
        }

        if self.distance == 0 || self.distance % DISTANCE_UNIT != 0 {
            return Err(FieldError::Distance(self.distance.to_string()));
        }

        if !self.baseline_time.is_finite() || self.baseline_time <= 0.0 {
            return Err(FieldError::Duration(self.baseline_time.to_string()));
        }

        if !self.time_dropped.is_finite() {
            return Err(FieldError::Delta(self.time_dropped.to_string()));
        }

        Ok(())
    }

    /// Key under which two records count as the same observation
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            swimmer_name: self.swimmer_name.clone(),
            age: self.age,
            gender: self.gender,
            stroke: self.stroke,
            distance: self.distance,
            baseline_bits: self.baseline_time.to_bits(),
        }
    }

    /// Improvement expressed as a fraction of the baseline time
    pub fn drop_ratio(&self) -> f64 {
        self.time_dropped / self.baseline_time
    }
}

/// Deduplication key: name, age, gender, stroke, distance and baseline time
///
/// Meet, date, course and time type are deliberately absent, so the same swim
/// listed under several meets collapses to one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub swimmer_name: String,
    pub age: u32,
    pub gender: Gender,
    pub stroke: Stroke,
    pub distance: u32,
    baseline_bits: u64,
}

impl IdentityKey {
    /// Baseline time in seconds, exactly as stored on the record
    pub fn baseline_time(&self) -> f64 {
        f64::from_bits(self.baseline_bits)
    }
}

// =============================================================================
// Improvement Report
// =============================================================================

/// Summary of one swimmer's improvements across all of their records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementReport {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    /// Sum of time dropped over every record
    pub total_time_dropped: f64,
    /// Smallest (most negative) time dropped
    pub fastest_time_dropped: f64,
    /// Mean of time dropped / baseline time, as a percentage
    pub average_percentage_time_dropped: f64,
    /// Sum of time dropped / baseline time as a percentage, over the normalization divisor
    pub total_percentage_time_dropped: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COURSE_CODES, GENDER_CODES, STROKE_NAMES, TIME_TYPE_CODES};

    fn create_test_context() -> SwimmerContext {
        SwimmerContext {
            name: "Doe, Jane".to_string(),
            age: 12,
            gender: Gender::Female,
        }
    }

    fn create_raw_fields() -> RawEventFields {
        RawEventFields {
            baseline_time: "1:05.32".to_string(),
            course: "Y".to_string(),
            time_type: "F".to_string(),
            time_dropped: "-1.25".to_string(),
            distance: "100".to_string(),
            stroke: "Free".to_string(),
            date: "6/15/2024".to_string(),
            meet: "Summer Invitational".to_string(),
        }
    }

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for &code in GENDER_CODES {
            assert_eq!(code.parse::<Gender>().unwrap().code(), code);
        }
        for &code in COURSE_CODES {
            assert_eq!(code.parse::<Course>().unwrap().code(), code);
        }
        for &code in TIME_TYPE_CODES {
            assert_eq!(code.parse::<TimeType>().unwrap().code(), code);
        }
        for &code in STROKE_NAMES {
            assert_eq!(code.parse::<Stroke>().unwrap().to_string(), code);
        }
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert!("m".parse::<Gender>().is_err());
        assert!("y".parse::<Course>().is_err());
        assert!("free".parse::<Stroke>().is_err());
        assert!("Medley".parse::<Stroke>().is_err());
    }

    #[test]
    fn test_swimmer_context_from_raw() {
        let context = SwimmerContext::from_raw("Doe, Jane", "12", "F").unwrap();
        assert_eq!(context, create_test_context());

        assert!(matches!(
            SwimmerContext::from_raw("Doe, Jane", "1x", "F"),
            Err(FieldError::Age(_))
        ));
        assert!(matches!(
            SwimmerContext::from_raw("Doe, Jane", "12", "X"),
            Err(FieldError::Gender(_))
        ));
        assert!(matches!(
            SwimmerContext::from_raw("  ", "12", "F"),
            Err(FieldError::Empty(_))
        ));
    }

    #[test]
    fn test_record_from_raw() {
        let record = SwimEventRecord::from_raw(&create_test_context(), &create_raw_fields()).unwrap();

        assert_eq!(record.swimmer_name, "Doe, Jane");
        assert_eq!(record.course, Course::ShortCourseYards);
        assert_eq!(record.time_type, TimeType::Final);
        assert_eq!(record.distance, 100);
        assert_eq!(record.stroke, Stroke::Free);
        assert_eq!(record.event_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(record.meet_name, "Summer Invitational");
        assert!((record.time_dropped + 1.25).abs() < 1e-9);
        assert!((record.baseline_time - 65.32).abs() < 1e-9);
    }

    #[test]
    fn test_record_from_raw_rejects_any_bad_field() {
        let context = create_test_context();

        let mut raw = create_raw_fields();
        raw.distance = "110".to_string();
        assert!(matches!(
            SwimEventRecord::from_raw(&context, &raw),
            Err(FieldError::Distance(_))
        ));

        let mut raw = create_raw_fields();
        raw.course = "X".to_string();
        assert!(matches!(
            SwimEventRecord::from_raw(&context, &raw),
            Err(FieldError::Course(_))
        ));

        let mut raw = create_raw_fields();
        raw.date = "2024-06-15".to_string();
        assert!(matches!(
            SwimEventRecord::from_raw(&context, &raw),
            Err(FieldError::Date(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_baseline() {
        let mut record =
            SwimEventRecord::from_raw(&create_test_context(), &create_raw_fields()).unwrap();
        record.baseline_time = 0.0;
        assert!(matches!(record.validate(), Err(FieldError::Duration(_))));
    }

    #[test]
    fn test_identity_key_ignores_meet_and_date() {
        let first = SwimEventRecord::from_raw(&create_test_context(), &create_raw_fields()).unwrap();
        let mut second = first.clone();
        second.meet_name = "Winter Classic".to_string();
        second.event_date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        second.time_type = TimeType::Prelim;

        assert_eq!(first.identity_key(), second.identity_key());
        assert_eq!(first.identity_key().baseline_time(), first.baseline_time);

        second.baseline_time = 65.33;
        assert_ne!(first.identity_key(), second.identity_key());
    }

    #[test]
    fn test_drop_ratio() {
        let mut record =
            SwimEventRecord::from_raw(&create_test_context(), &create_raw_fields()).unwrap();
        record.time_dropped = -1.0;
        record.baseline_time = 50.0;
        assert!((record.drop_ratio() + 0.02).abs() < 1e-12);
    }
}
