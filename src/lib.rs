//! Most Improved Library
//!
//! A Rust library for extracting swimmer improvement records from
//! meet-results documents converted to text, and for reporting which
//! swimmers dropped the most time.
//!
//! This library provides tools for:
//! - Normalizing loosely formatted tokens (times, dates, coded letters)
//! - Classifying text lines and tracking the swimmer in scope across pages
//! - Deduplicating records that describe the same swim
//! - Aggregating per-swimmer improvement statistics
//! - Loading documents as pages of lines (plain text or PDF)
//! - Writing the record and report tables as CSV or Parquet

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod line_parser;
        pub mod record_processor;
        pub mod table_writer;
    }
    pub mod adapters {
        pub mod text_source;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ImprovementReport, SwimEventRecord, SwimmerContext};
pub use config::Config;

/// Result type alias for the most-improved processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for document processing operations
///
/// Problems with individual lines or fields are not errors at this level;
/// they are typed rejections counted in parse statistics. These variants
/// cover whole-document and whole-run failures.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Text could not be extracted from a source document
    #[error("Text extraction failed for '{file}': {message}")]
    TextExtraction { file: String, message: String },

    /// Building or writing an output table failed
    #[error("Table error: {message}")]
    Table {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Invalid configuration file '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid file name pattern
    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Output file exists and overwriting was not requested
    #[error("Output file already exists: {path} (use --force to overwrite)")]
    OutputExists { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Run report could not be rendered
    #[error("Report rendering failed: {message}")]
    Report { message: String },

    /// Background document task failed
    #[error("Document task failed: {message}")]
    Task { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a text extraction error
    pub fn text_extraction(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TextExtraction {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a table error
    pub fn table(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Table {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration parse error
    pub fn config_parse(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid pattern error
    pub fn pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an output exists error
    pub fn output_exists(path: impl Into<String>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a report rendering error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }

    /// Create a task error
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Table {
            message: "Table operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
