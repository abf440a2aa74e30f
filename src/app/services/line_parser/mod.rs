//! Line parser for improved-time report text
//!
//! This module turns the text lines of a meet-results document into validated
//! improvement records. Layout conventions vary between documents (merged
//! columns, optional markers, different row orders), so every decision is
//! made one line at a time and a bad line is dropped rather than failing the
//! document.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`field_parsers`] - Conversion and validation of individual tokens
//! - [`classifier`] - Line classification and token extraction per layout dialect
//! - [`parser`] - State machine carrying the current swimmer across lines and pages
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use most_improved::app::services::line_parser::DocumentParser;
//! use most_improved::config::ParserConfig;
//!
//! let parser = DocumentParser::new(ParserConfig::default());
//! let result = parser.parse_lines([
//!     "Doe, Jane (12) F",
//!     "1:05.32 Y F -1.25 100 Free 6/15/2024 Summer Invitational",
//! ]);
//!
//! assert_eq!(result.records.len(), 1);
//! assert_eq!(result.stats.distinct_swimmers, 1);
//! ```

pub mod classifier;
pub mod field_parsers;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use classifier::{LineClass, LineClassifier, LineRejection, ParseStrategy};
pub use field_parsers::{FieldError, RawEventFields};
pub use parser::{DocumentParser, ParserState};
pub use stats::{ParseResult, ParseStats};
