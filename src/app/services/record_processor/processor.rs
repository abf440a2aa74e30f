//! Record processor pipeline orchestration
//!
//! Runs the post-parsing pipeline for one document: deduplication followed
//! by per-swimmer aggregation.

use crate::app::models::SwimEventRecord;
use crate::config::ReportConfig;
use tracing::info;

use super::{
    aggregation::aggregate_improvements,
    deduplication::deduplicate_records,
    stats::{ProcessingResult, ProcessingStats},
};

/// Record processor for parsed improvement records
///
/// Holds configuration only; every call to [`RecordProcessor::process_records`]
/// starts from an empty record store, so documents never share state.
///
/// # Example
///
/// ```rust
/// use most_improved::app::services::record_processor::RecordProcessor;
/// use most_improved::config::ReportConfig;
///
/// let processor = RecordProcessor::new(ReportConfig::default());
/// let result = processor.process_records(Vec::new());
///
/// assert!(result.records.is_empty());
/// assert!(result.reports.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordProcessor {
    report_config: ReportConfig,
}

impl RecordProcessor {
    /// Create a new record processor
    pub fn new(report_config: ReportConfig) -> Self {
        Self { report_config }
    }

    /// Deduplicate the records of one document and aggregate them per swimmer
    pub fn process_records(&self, records: Vec<SwimEventRecord>) -> ProcessingResult {
        let mut stats = ProcessingStats::new();
        stats.total_input = records.len();

        let records = deduplicate_records(records, &mut stats);
        stats.deduplicated = records.len();

        let reports = aggregate_improvements(&records, self.report_config.normalization_divisor);
        stats.swimmers_reported = reports.len();

        info!("{}", stats.summary());

        ProcessingResult::new(records, reports, stats)
    }
}
