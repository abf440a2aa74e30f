//! Application constants for the most-improved processor
//!
//! This module contains the fixed vocabularies, default values and output
//! column names used throughout the application.

// =============================================================================
// Input Discovery
// =============================================================================

/// Default directory scanned for source documents
pub const DEFAULT_INPUT_DIR: &str = "./.data";

/// Default directory receiving the generated tables
pub const DEFAULT_OUTPUT_DIR: &str = "./.output";

/// File name patterns picked up when none are configured
pub const DEFAULT_FILE_PATTERNS: &[&str] = &["*.pdf", "*.txt"];

/// Page separator used in pre-extracted plain-text documents
pub const PAGE_SEPARATOR: char = '\u{000C}';

// =============================================================================
// Line Classification
// =============================================================================

/// Substrings marking page furniture that never carries swimmer data
///
/// Page numbers are matched separately as `Page <digits>`, since a bare
/// `Page` would also swallow swimmers with that surname.
pub const DEFAULT_NOISE_MARKERS: &[&str] = &["Licensed To:", "Individual Top Times"];

/// Glyph the text extractor emits in place of a plain `f`
pub const LIGATURE_GLYPH: char = 'ϐ';

/// Replacement for [`LIGATURE_GLYPH`]
pub const LIGATURE_REPLACEMENT: &str = "f";

/// Minimum whitespace-delimited tokens in an event row, before column repair
pub const MIN_EVENT_TOKENS: usize = 8;

/// Index of the column that may be merged with its right neighbour
pub const MERGED_COLUMN_INDEX: usize = 2;

/// Marker prefixed to unofficial or converted baseline times
pub const UNOFFICIAL_TIME_MARKER: char = 'x';

/// Leading lines dropped from the first page in the regex dialect
pub const PATTERN_DIALECT_FIRST_PAGE_SKIP: usize = 5;

/// Leading lines dropped from every later page in the regex dialect
pub const PATTERN_DIALECT_PAGE_SKIP: usize = 4;

/// Upper bound on diagnostic messages retained per document
pub const MAX_DIAGNOSTIC_MESSAGES: usize = 200;

// =============================================================================
// Field Vocabularies
// =============================================================================

/// Accepted gender codes
pub const GENDER_CODES: &[&str] = &["M", "F"];

/// Accepted course codes (short-course meters, short-course yards, long-course meters)
pub const COURSE_CODES: &[&str] = &["S", "Y", "L"];

/// Accepted time type codes (prelim, final, single)
pub const TIME_TYPE_CODES: &[&str] = &["P", "F", "S"];

/// Accepted stroke names
pub const STROKE_NAMES: &[&str] = &["Free", "Back", "Breast", "Fly", "IM"];

/// Every event distance is a multiple of this many units
pub const DISTANCE_UNIT: u32 = 25;

/// Accepted event date layout (month/day/year)
pub const EVENT_DATE_FORMAT: &str = "%m/%d/%Y";

// =============================================================================
// Reporting
// =============================================================================

/// Divisor applied to the summed percentage time dropped.
///
/// The source reports always divided the total by 5. What the 5 stands for
/// is not recorded anywhere, so it is kept as a configurable value rather than
/// derived from the record count.
pub const DEFAULT_NORMALIZATION_DIVISOR: f64 = 5.0;

/// Suffix of the deduplicated record table file
pub const RAW_TABLE_SUFFIX: &str = "_raw";

/// Suffix of the improvement report table file
pub const REPORT_TABLE_SUFFIX: &str = "_report";

/// Column names of the deduplicated record table
pub mod record_columns {
    pub const NAME: &str = "Name";
    pub const AGE: &str = "Age";
    pub const GENDER: &str = "Gender";
    pub const COURSE: &str = "Course";
    pub const TIME_TYPE: &str = "TypeOfTime";
    pub const DISTANCE: &str = "Distance";
    pub const STROKE: &str = "Stroke";
    pub const DATE: &str = "Date";
    pub const MEET: &str = "Meet";
    pub const TIME_DROPPED: &str = "TimeDropped";
    pub const BASELINE_TIME: &str = "BaselineTime";

    /// All columns in output order
    pub const ALL: &[&str] = &[
        NAME,
        AGE,
        GENDER,
        COURSE,
        TIME_TYPE,
        DISTANCE,
        STROKE,
        DATE,
        MEET,
        TIME_DROPPED,
        BASELINE_TIME,
    ];
}

/// Column names of the improvement report table
pub mod report_columns {
    pub const NAME: &str = "Name";
    pub const AGE: &str = "Age";
    pub const GENDER: &str = "Gender";
    pub const TOTAL_TIME_DROPPED: &str = "TotalTimeDropped";
    pub const FASTEST_TIME_DROPPED: &str = "FastestTimeDropped";
    pub const AVERAGE_PERCENTAGE_TIME_DROPPED: &str = "AveragePercentageTimeDropped";
    pub const TOTAL_PERCENTAGE_TIME_DROPPED: &str = "TotalPercentageTimeDropped";

    /// All columns in output order
    pub const ALL: &[&str] = &[
        NAME,
        AGE,
        GENDER,
        TOTAL_TIME_DROPPED,
        FASTEST_TIME_DROPPED,
        AVERAGE_PERCENTAGE_TIME_DROPPED,
        TOTAL_PERCENTAGE_TIME_DROPPED,
    ];
}

// =============================================================================
// Performance
// =============================================================================

/// Upper bound on documents processed concurrently
pub const MAX_PARALLEL_WORKERS: usize = 64;

/// Environment variable overriding the input directory
pub const ENV_INPUT: &str = "MOST_IMPROVED_INPUT";

/// Environment variable overriding the output directory
pub const ENV_OUTPUT: &str = "MOST_IMPROVED_OUTPUT";

/// Environment variable overriding the worker count
pub const ENV_WORKERS: &str = "MOST_IMPROVED_WORKERS";

/// Environment variable overriding the normalization divisor
pub const ENV_DIVISOR: &str = "MOST_IMPROVED_DIVISOR";
