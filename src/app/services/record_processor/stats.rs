//! Processing statistics and result structures for the record pipeline
//!
//! This module provides types for tracking deduplication and aggregation and
//! for handing the final tables to the output layer.

use crate::app::models::{ImprovementReport, SwimEventRecord};

/// Statistics for record processing operations
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ProcessingStats {
    /// Number of validated records received
    pub total_input: usize,
    /// Number of later duplicates dropped
    pub duplicates_removed: usize,
    /// Number of records after deduplication
    pub deduplicated: usize,
    /// Number of swimmer reports produced
    pub swimmers_reported: usize,
}

impl ProcessingStats {
    /// Create new empty processing statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Percentage of input records that survived deduplication
    pub fn retention_rate(&self) -> f64 {
        if self.total_input == 0 {
            100.0
        } else {
            (self.deduplicated as f64 / self.total_input as f64) * 100.0
        }
    }

    /// Get summary of processing statistics
    pub fn summary(&self) -> String {
        format!(
            "Processing Summary: {} -> {} records ({:.1}% retained, {} duplicates) | {} swimmers",
            self.total_input,
            self.deduplicated,
            self.retention_rate(),
            self.duplicates_removed,
            self.swimmers_reported
        )
    }
}

/// Deduplicated records and the improvement report for one document
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// Deduplicated records in first-occurrence order
    pub records: Vec<SwimEventRecord>,
    /// One report per swimmer, ordered by name
    pub reports: Vec<ImprovementReport>,
    /// Processing statistics
    pub stats: ProcessingStats,
}

impl ProcessingResult {
    pub fn new(
        records: Vec<SwimEventRecord>,
        reports: Vec<ImprovementReport>,
        stats: ProcessingStats,
    ) -> Self {
        Self {
            records,
            reports,
            stats,
        }
    }

    /// Get the number of retained records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        self.stats.summary()
    }
}
