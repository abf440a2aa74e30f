//! Per-swimmer improvement aggregation
//!
//! Groups deduplicated records by exact swimmer name and summarises each
//! group into an [`ImprovementReport`].

use crate::app::models::{ImprovementReport, SwimEventRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Build one report per distinct swimmer name, ordered by name
///
/// Age and gender are taken from the swimmer's first record. Names are
/// compared exactly, so two spellings of the same swimmer yield two reports.
pub fn aggregate_improvements(
    records: &[SwimEventRecord],
    normalization_divisor: f64,
) -> Vec<ImprovementReport> {
    let mut groups: BTreeMap<&str, Vec<&SwimEventRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.swimmer_name.as_str())
            .or_default()
            .push(record);
    }

    debug!(
        "Aggregating {} records into {} swimmer reports",
        records.len(),
        groups.len()
    );

    groups
        .into_values()
        .filter_map(|group| summarize_swimmer(&group, normalization_divisor))
        .collect()
}

/// Summarise one swimmer's records; `None` for an empty group
pub fn summarize_swimmer(
    group: &[&SwimEventRecord],
    normalization_divisor: f64,
) -> Option<ImprovementReport> {
    let first = group.first()?;

    let total_time_dropped: f64 = group.iter().map(|r| r.time_dropped).sum();
    let fastest_time_dropped = group
        .iter()
        .map(|r| r.time_dropped)
        .fold(f64::INFINITY, f64::min);

    let ratio_sum: f64 = group.iter().map(|r| r.drop_ratio()).sum();
    let average_percentage_time_dropped = ratio_sum / group.len() as f64 * 100.0;
    let total_percentage_time_dropped = ratio_sum * 100.0 / normalization_divisor;

    Some(ImprovementReport {
        name: first.swimmer_name.clone(),
        age: first.age,
        gender: first.gender,
        total_time_dropped,
        fastest_time_dropped,
        average_percentage_time_dropped,
        total_percentage_time_dropped,
    })
}

/// Reports sorted from most to least improved by average percentage
pub fn rank_by_average_percentage<'a, I>(reports: I) -> Vec<&'a ImprovementReport>
where
    I: IntoIterator<Item = &'a ImprovementReport>,
{
    let mut ranked: Vec<&ImprovementReport> = reports.into_iter().collect();
    ranked.sort_by(|a, b| {
        a.average_percentage_time_dropped
            .total_cmp(&b.average_percentage_time_dropped)
    });
    ranked
}
