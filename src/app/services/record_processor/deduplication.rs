//! Record deduplication logic for improvement records
//!
//! The same swim often appears more than once in a report, for example under
//! two meets or as both a prelim and a final. Records are considered the same
//! observation when they share an [`IdentityKey`]; the first one seen is kept
//! and relative order is preserved.

use crate::app::models::{IdentityKey, SwimEventRecord};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use super::stats::ProcessingStats;

/// Deduplicate records by identity key, keeping the first occurrence
///
/// # Arguments
///
/// * `records` - Validated records in document order
/// * `stats` - Mutable reference to processing statistics
///
/// # Returns
///
/// Records with later duplicates removed, in first-occurrence order
pub fn deduplicate_records(
    records: Vec<SwimEventRecord>,
    stats: &mut ProcessingStats,
) -> Vec<SwimEventRecord> {
    let input_count = records.len();
    let mut seen: HashSet<IdentityKey> = HashSet::with_capacity(input_count);
    let mut deduplicated = Vec::with_capacity(input_count);

    for record in records {
        let key = record.identity_key();
        if seen.contains(&key) {
            debug!(
                "Dropped duplicate record for {}: {} {} baseline {:.2}s at '{}'",
                key.swimmer_name,
                key.distance,
                key.stroke,
                key.baseline_time(),
                record.meet_name
            );
        } else {
            seen.insert(key);
            deduplicated.push(record);
        }
    }

    let (_, removed) = get_deduplication_metrics(input_count, deduplicated.len());
    stats.duplicates_removed += removed;

    info!(
        "Deduplication complete: removed {} duplicates, {} records remaining",
        removed,
        deduplicated.len()
    );

    deduplicated
}

/// Analyze duplicate patterns in a collection of records
///
/// # Returns
///
/// Tuple of (total_groups, duplicate_groups, total_duplicates)
pub fn analyze_duplicate_patterns(records: &[SwimEventRecord]) -> (usize, usize, usize) {
    let mut groups: HashMap<IdentityKey, usize> = HashMap::new();

    for record in records {
        *groups.entry(record.identity_key()).or_insert(0) += 1;
    }

    let total_groups = groups.len();
    let duplicate_groups = groups.values().filter(|&&count| count > 1).count();
    let total_duplicates = groups.values().map(|&count| count.saturating_sub(1)).sum();

    (total_groups, duplicate_groups, total_duplicates)
}

/// Get deduplication effectiveness metrics
///
/// # Returns
///
/// Tuple of (reduction_percentage, duplicates_removed)
pub fn get_deduplication_metrics(input_count: usize, output_count: usize) -> (f64, usize) {
    let duplicates_removed = input_count.saturating_sub(output_count);
    let reduction_percentage = if input_count > 0 {
        (duplicates_removed as f64 / input_count as f64) * 100.0
    } else {
        0.0
    };

    (reduction_percentage, duplicates_removed)
}

/// Check if two records describe the same observation
pub fn are_duplicates(first: &SwimEventRecord, second: &SwimEventRecord) -> bool {
    first.identity_key() == second.identity_key()
}
