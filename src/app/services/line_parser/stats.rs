//! Parsing statistics and result structures for document parsing
//!
//! This module provides types for tracking how each line of a document was
//! used and for handing the parsed records to downstream processing.

use super::classifier::LineRejection;
use crate::app::models::SwimEventRecord;
use crate::constants::MAX_DIAGNOSTIC_MESSAGES;

/// Parsing result with records and line statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Validated records in document order
    pub records: Vec<SwimEventRecord>,

    /// Line statistics and diagnostics
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Line-level parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of lines seen across all pages
    pub total_lines: usize,

    /// Lines dropped as page header before classification
    pub skipped_lines: usize,

    /// Blank lines and boilerplate
    pub noise_lines: usize,

    /// Swimmer header lines recognised
    pub swimmer_headers: usize,

    /// Distinct swimmer names among recognised headers
    pub distinct_swimmers: usize,

    /// Records that passed validation
    pub records_parsed: usize,

    /// Event rows dropped because a field failed normalization
    pub field_validation_errors: usize,

    /// Event rows with fewer than the minimum number of tokens
    pub too_few_tokens: usize,

    /// Lines matching no known layout
    pub unrecognized_lines: usize,

    /// Header-shaped lines whose name, age or gender was invalid
    pub invalid_headers: usize,

    /// Diagnostic messages (bounded) for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a rejected line and keep a diagnostic message for it
    pub fn record_rejection(&mut self, line_number: usize, rejection: &LineRejection) {
        match rejection {
            LineRejection::Unrecognized => self.unrecognized_lines += 1,
            LineRejection::TooFewTokens { .. } => self.too_few_tokens += 1,
            LineRejection::InvalidHeader(_) => self.invalid_headers += 1,
            LineRejection::FieldValidation(_) => self.field_validation_errors += 1,
        }

        if self.errors.len() < MAX_DIAGNOSTIC_MESSAGES {
            self.errors
                .push(format!("Line {}: {}", line_number, rejection));
        }
    }

    /// Total number of rejected lines of any kind
    pub fn rejected_lines(&self) -> usize {
        self.field_validation_errors
            + self.too_few_tokens
            + self.unrecognized_lines
            + self.invalid_headers
    }

    /// Percentage of event-row candidates that became records
    pub fn success_rate(&self) -> f64 {
        let candidates = self.records_parsed + self.field_validation_errors + self.too_few_tokens;
        if candidates == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / candidates as f64) * 100.0
        }
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} lines | {} swimmers ({} headers) | {} records | {} rejected \
             (fields: {}, short rows: {}, unrecognized: {}, bad headers: {})",
            self.total_lines,
            self.distinct_swimmers,
            self.swimmer_headers,
            self.records_parsed,
            self.rejected_lines(),
            self.field_validation_errors,
            self.too_few_tokens,
            self.unrecognized_lines,
            self.invalid_headers
        )
    }
}
