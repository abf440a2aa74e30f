//! Record processing module for improvement records
//!
//! This module turns the flat record sequence produced by the line parser
//! into the two output tables of a document: the deduplicated record table
//! and the per-swimmer improvement report.
//!
//! # Architecture
//!
//! - [`processor`] - Main RecordProcessor struct and pipeline orchestration
//! - [`deduplication`] - First-seen-wins deduplication by identity key
//! - [`aggregation`] - Per-swimmer improvement statistics
//! - [`stats`] - Processing statistics and result structures

pub mod aggregation;
pub mod deduplication;
pub mod processor;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use processor::RecordProcessor;
pub use stats::{ProcessingResult, ProcessingStats};

pub use aggregation::{aggregate_improvements, rank_by_average_percentage, summarize_swimmer};
pub use deduplication::{
    analyze_duplicate_patterns, are_duplicates, deduplicate_records, get_deduplication_metrics,
};
