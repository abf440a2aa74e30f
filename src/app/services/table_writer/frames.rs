//! DataFrame construction for the record and report tables

use crate::app::models::{ImprovementReport, SwimEventRecord};
use crate::constants::{record_columns, report_columns};
use crate::{Error, Result};
use polars::prelude::*;
use std::io::Write;

/// Build the deduplicated record table
///
/// Codes are written as their document letters and dates as `YYYY-MM-DD`.
pub fn records_to_frame(records: &[SwimEventRecord]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            record_columns::NAME.into(),
            records.iter().map(|r| r.swimmer_name.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::AGE.into(),
            records.iter().map(|r| i64::from(r.age)).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::GENDER.into(),
            records.iter().map(|r| r.gender.code()).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::COURSE.into(),
            records.iter().map(|r| r.course.code()).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::TIME_TYPE.into(),
            records.iter().map(|r| r.time_type.code()).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::DISTANCE.into(),
            records.iter().map(|r| i64::from(r.distance)).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::STROKE.into(),
            records.iter().map(|r| r.stroke.code()).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::DATE.into(),
            records
                .iter()
                .map(|r| r.event_date.format("%Y-%m-%d").to_string())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::MEET.into(),
            records.iter().map(|r| r.meet_name.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::TIME_DROPPED.into(),
            records.iter().map(|r| r.time_dropped).collect::<Vec<_>>(),
        ),
        Column::new(
            record_columns::BASELINE_TIME.into(),
            records.iter().map(|r| r.baseline_time).collect::<Vec<_>>(),
        ),
    ];

    DataFrame::new(columns).map_err(|e| Error::table("Failed to build record table", e))
}

/// Build the improvement report table
pub fn reports_to_frame(reports: &[ImprovementReport]) -> Result<DataFrame> {
    let columns = vec![
        Column::new(
            report_columns::NAME.into(),
            reports.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            report_columns::AGE.into(),
            reports.iter().map(|r| i64::from(r.age)).collect::<Vec<_>>(),
        ),
        Column::new(
            report_columns::GENDER.into(),
            reports.iter().map(|r| r.gender.code()).collect::<Vec<_>>(),
        ),
        Column::new(
            report_columns::TOTAL_TIME_DROPPED.into(),
            reports.iter().map(|r| r.total_time_dropped).collect::<Vec<_>>(),
        ),
        Column::new(
            report_columns::FASTEST_TIME_DROPPED.into(),
            reports.iter().map(|r| r.fastest_time_dropped).collect::<Vec<_>>(),
        ),
        Column::new(
            report_columns::AVERAGE_PERCENTAGE_TIME_DROPPED.into(),
            reports
                .iter()
                .map(|r| r.average_percentage_time_dropped)
                .collect::<Vec<_>>(),
        ),
        Column::new(
            report_columns::TOTAL_PERCENTAGE_TIME_DROPPED.into(),
            reports
                .iter()
                .map(|r| r.total_percentage_time_dropped)
                .collect::<Vec<_>>(),
        ),
    ];

    DataFrame::new(columns).map_err(|e| Error::table("Failed to build report table", e))
}

/// Write a frame as CSV with a header row
pub fn write_csv<W: Write>(df: &mut DataFrame, writer: W) -> Result<()> {
    CsvWriter::new(writer)
        .include_header(true)
        .finish(df)
        .map_err(|e| Error::table("Failed to write CSV", e))
}
