//! Field normalization utilities for improvement records
//!
//! Each function converts one loosely formatted token into its canonical
//! value, or returns a [`FieldError`] naming the field and the offending
//! token. Nothing here logs or panics; callers decide what a rejection means.

use crate::app::models::{Course, Gender, Stroke, TimeType};
use crate::constants::{DISTANCE_UNIT, EVENT_DATE_FORMAT, UNOFFICIAL_TIME_MARKER};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// `[M:]SS.f` with one- or two-digit minutes and seconds and up to six fraction digits
static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<minutes>\d{1,2}):)?(?P<seconds>\d{1,2})\.(?P<fraction>\d{1,6})$")
        .expect("duration pattern is valid")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("date pattern is valid")
});

pub type FieldResult<T> = std::result::Result<T, FieldError>;

/// Reason a single field failed normalization
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("invalid gender '{0}': expected M or F")]
    Gender(String),

    #[error("invalid course '{0}': expected S, Y or L")]
    Course(String),

    #[error("invalid time type '{0}': expected P, F or S")]
    TimeType(String),

    #[error("invalid distance '{0}': expected a positive multiple of 25")]
    Distance(String),

    #[error("invalid stroke '{0}': expected Free, Back, Breast, Fly or IM")]
    Stroke(String),

    #[error("invalid date '{0}': expected month/day/year")]
    Date(String),

    #[error("invalid duration '{0}': expected M:SS.ff or SS.ff")]
    Duration(String),

    #[error("invalid time dropped '{0}': expected a signed number")]
    Delta(String),

    #[error("invalid age '{0}': expected a non-negative integer")]
    Age(String),

    #[error("empty {0}")]
    Empty(&'static str),
}

impl FieldError {
    /// Name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Gender(_) => "gender",
            FieldError::Course(_) => "course",
            FieldError::TimeType(_) => "time type",
            FieldError::Distance(_) => "distance",
            FieldError::Stroke(_) => "stroke",
            FieldError::Date(_) => "date",
            FieldError::Duration(_) => "baseline time",
            FieldError::Delta(_) => "time dropped",
            FieldError::Age(_) => "age",
            FieldError::Empty(field) => field,
        }
    }
}

/// Raw, unvalidated tokens of one event row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEventFields {
    pub baseline_time: String,
    pub course: String,
    pub time_type: String,
    pub time_dropped: String,
    pub distance: String,
    pub stroke: String,
    pub date: String,
    pub meet: String,
}

/// Parse a gender code (`M` or `F`, case-sensitive)
pub fn parse_gender(value: &str) -> FieldResult<Gender> {
    value.parse()
}

/// Parse a course code (`S`, `Y` or `L`)
pub fn parse_course(value: &str) -> FieldResult<Course> {
    value.parse()
}

/// Parse a time type code (`P`, `F` or `S`)
pub fn parse_time_type(value: &str) -> FieldResult<TimeType> {
    value.parse()
}

/// Parse a stroke name
pub fn parse_stroke(value: &str) -> FieldResult<Stroke> {
    value.parse()
}

/// Parse an event distance, which must be a positive multiple of 25
pub fn parse_distance(value: &str) -> FieldResult<u32> {
    let distance = value
        .trim()
        .parse::<u32>()
        .map_err(|_| FieldError::Distance(value.to_string()))?;

    if distance == 0 || distance % DISTANCE_UNIT != 0 {
        return Err(FieldError::Distance(value.to_string()));
    }

    Ok(distance)
}

/// Parse a swimmer age
pub fn parse_age(value: &str) -> FieldResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| FieldError::Age(value.to_string()))
}

/// Parse a month/day/year date; zero padding is optional, the year has four digits
pub fn parse_date(value: &str) -> FieldResult<NaiveDate> {
    if !DATE_PATTERN.is_match(value) {
        return Err(FieldError::Date(value.to_string()));
    }

    NaiveDate::parse_from_str(value, EVENT_DATE_FORMAT)
        .map_err(|_| FieldError::Date(value.to_string()))
}

/// Parse a swim time into elapsed seconds
///
/// Accepts `M:SS.f` first, then `SS.f`. One leading `x` (unofficial time
/// marker) is ignored. Minutes and seconds must be below 60 and the fraction
/// is read as microseconds, so `"1:05.32"` is 65.32 seconds.
pub fn parse_duration(value: &str) -> FieldResult<f64> {
    let token = value.strip_prefix(UNOFFICIAL_TIME_MARKER).unwrap_or(value);
    let invalid = || FieldError::Duration(value.to_string());

    let captures = DURATION_PATTERN.captures(token).ok_or_else(invalid)?;

    let minutes = match captures.name("minutes") {
        Some(m) => m.as_str().parse::<u32>().map_err(|_| invalid())?,
        None => 0,
    };
    let seconds = captures["seconds"].parse::<u32>().map_err(|_| invalid())?;
    let micros = parse_microseconds(&captures["fraction"]).ok_or_else(invalid)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let total = f64::from(minutes) * 60.0 + f64::from(seconds) + f64::from(micros) / 1_000_000.0;
    if total <= 0.0 {
        return Err(invalid());
    }

    Ok(total)
}

/// Right-pad a fraction to six digits and read it as microseconds
fn parse_microseconds(fraction: &str) -> Option<u32> {
    format!("{:0<6}", fraction).parse::<u32>().ok()
}

/// Parse a signed time-dropped delta
pub fn parse_delta(value: &str) -> FieldResult<f64> {
    let delta = value
        .trim()
        .parse::<f64>()
        .map_err(|_| FieldError::Delta(value.to_string()))?;

    if !delta.is_finite() {
        return Err(FieldError::Delta(value.to_string()));
    }

    Ok(delta)
}

/// Accept any non-empty text as-is
pub fn parse_text<'a>(value: &'a str, field: &'static str) -> FieldResult<&'a str> {
    if value.trim().is_empty() {
        Err(FieldError::Empty(field))
    } else {
        Ok(value)
    }
}
