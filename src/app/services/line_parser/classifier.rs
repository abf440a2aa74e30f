//! Line classification and token extraction
//!
//! A [`LineClassifier`] looks at one line of extracted text, together with
//! the swimmer currently in scope, and decides whether the line is page
//! furniture, a swimmer header, an event row or something it cannot use.
//! Two layout dialects are supported through [`ParseStrategy`]:
//!
//! - [`ParseStrategy::Columns`] splits on whitespace and maps fixed token
//!   positions, repairing one commonly merged column.
//! - [`ParseStrategy::Pattern`] matches whole lines against regular
//!   expressions, for documents whose event rows lead with the date.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::field_parsers::{FieldError, RawEventFields};
use crate::app::models::SwimmerContext;
use crate::config::ParserConfig;
use crate::constants::{
    LIGATURE_GLYPH, LIGATURE_REPLACEMENT, MERGED_COLUMN_INDEX, MIN_EVENT_TOKENS,
};

static PAGE_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bPage\s+\d+\b").expect("page number pattern is valid")
});

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[A-Za-z ,'.\-]+?)\s+\((?P<age>\d+)\)\s+(?P<gender>\S+)")
        .expect("header pattern is valid")
});

static EVENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<date>\d+/\d+/\d+)\s+",
        r"(?P<meet>[A-Za-z0-9 @&'.\-]+?)\s+",
        r"x?(?P<time>[\d.:]+)\s*",
        r"(?P<course>[A-Z])\s+",
        r"(?P<distance>\d+)\s*(?P<stroke>[A-Za-z]+)\s+",
        r"(?P<time_type>[A-Z])\s*",
        r"(?P<delta>[-+]?\d*\.?\d+)\s*$",
    ))
    .expect("event pattern is valid")
});

/// Layout dialect used to read swimmer headers and event rows
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ParseStrategy {
    /// Whitespace tokens mapped by position: `time course type delta distance stroke date meet...`
    #[default]
    Columns,
    /// Regular expressions over rows shaped `date meet time course distanceStroke type delta`
    Pattern,
}

/// Outcome of classifying a single line
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// Blank line or page furniture; ignored without touching the context
    BlankOrNoise,
    /// Start of a new swimmer block
    SwimmerHeader(SwimmerContext),
    /// Raw tokens of an event row for the current swimmer
    EventRow(RawEventFields),
    /// Line that could not be used
    Rejected(LineRejection),
}

/// Reason a line produced no header and no record
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineRejection {
    #[error("line matches no known layout")]
    Unrecognized,

    #[error("event row has {found} tokens, at least {} required", MIN_EVENT_TOKENS)]
    TooFewTokens { found: usize },

    #[error("swimmer header rejected: {0}")]
    InvalidHeader(FieldError),

    #[error("event row rejected: {0}")]
    FieldValidation(FieldError),
}

/// Classifier for lines of improved-time reports
#[derive(Debug, Clone)]
pub struct LineClassifier {
    strategy: ParseStrategy,
    noise_markers: Vec<String>,
    fix_ligatures: bool,
}

impl LineClassifier {
    /// Create a classifier from parser configuration
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            strategy: config.strategy,
            noise_markers: config.noise_markers.clone(),
            fix_ligatures: config.fix_ligatures,
        }
    }

    pub fn strategy(&self) -> ParseStrategy {
        self.strategy
    }

    /// Classify one line given the swimmer currently in scope
    pub fn classify(&self, line: &str, context: Option<&SwimmerContext>) -> LineClass {
        let line = self.normalize(line);

        if self.is_noise(&line) {
            return LineClass::BlankOrNoise;
        }

        let header = match self.strategy {
            ParseStrategy::Columns => classify_columns_header(&line),
            ParseStrategy::Pattern => classify_pattern_header(&line),
        };
        if let Some(class) = header {
            return class;
        }

        if context.is_none() {
            return LineClass::Rejected(LineRejection::Unrecognized);
        }

        match self.strategy {
            ParseStrategy::Columns => extract_columns_event(&line),
            ParseStrategy::Pattern => extract_pattern_event(&line),
        }
    }

    /// Apply line-level fix-ups before classification
    pub fn normalize<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.fix_ligatures && line.contains(LIGATURE_GLYPH) {
            Cow::Owned(line.replace(LIGATURE_GLYPH, LIGATURE_REPLACEMENT))
        } else {
            Cow::Borrowed(line)
        }
    }

    /// Blank lines, page numbers and lines carrying a boilerplate marker
    pub fn is_noise(&self, line: &str) -> bool {
        line.trim().is_empty()
            || PAGE_NUMBER_PATTERN.is_match(line)
            || self
                .noise_markers
                .iter()
                .any(|marker| line.contains(marker.as_str()))
    }
}

/// Header in the columns dialect: `Last, First (age) gender`
fn classify_columns_header(line: &str) -> Option<LineClass> {
    let looks_like_header = line.contains('(')
        && line.contains(')')
        && line.contains(',')
        && (line.contains('M') || line.contains('F'));
    if !looks_like_header {
        return None;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let split = tokens.len().saturating_sub(2);
    let name = tokens[..split].join(" ");
    let age = tokens.get(split).map(|t| strip_enclosing(t)).unwrap_or_default();
    let gender = tokens.get(split + 1).copied().unwrap_or_default();

    Some(match SwimmerContext::from_raw(&name, age, gender) {
        Ok(context) => LineClass::SwimmerHeader(context),
        Err(e) => LineClass::Rejected(LineRejection::InvalidHeader(e)),
    })
}

/// Header in the pattern dialect
fn classify_pattern_header(line: &str) -> Option<LineClass> {
    let captures = HEADER_PATTERN.captures(line)?;

    Some(
        match SwimmerContext::from_raw(
            captures["name"].trim(),
            &captures["age"],
            &captures["gender"],
        ) {
            Ok(context) => LineClass::SwimmerHeader(context),
            Err(e) => LineClass::Rejected(LineRejection::InvalidHeader(e)),
        },
    )
}

/// Drop the first and last character, e.g. `(12)` becomes `12`
fn strip_enclosing(token: &str) -> &str {
    let mut chars = token.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Split a merged narrow column back into two tokens
///
/// When the token at the merge-prone position is longer than one character,
/// its first character stays in place and the remainder is inserted as the
/// next token, shifting every later token right by one.
pub fn repair_merged_column(tokens: &mut Vec<&str>) {
    let Some(token) = tokens.get(MERGED_COLUMN_INDEX).copied() else {
        return;
    };
    let Some(first_len) = token.chars().next().map(char::len_utf8) else {
        return;
    };

    if token.len() > first_len {
        tokens[MERGED_COLUMN_INDEX] = &token[..first_len];
        tokens.insert(MERGED_COLUMN_INDEX + 1, &token[first_len..]);
    }
}

/// Event row in the columns dialect
fn extract_columns_event(line: &str) -> LineClass {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_EVENT_TOKENS {
        return LineClass::Rejected(LineRejection::TooFewTokens {
            found: tokens.len(),
        });
    }

    repair_merged_column(&mut tokens);

    LineClass::EventRow(RawEventFields {
        baseline_time: tokens[0].to_string(),
        course: tokens[1].to_string(),
        time_type: tokens[2].to_string(),
        time_dropped: tokens[3].to_string(),
        distance: tokens[4].to_string(),
        stroke: tokens[5].to_string(),
        date: tokens[6].to_string(),
        meet: tokens[7..].join(" "),
    })
}

/// Event row in the pattern dialect
fn extract_pattern_event(line: &str) -> LineClass {
    let Some(captures) = EVENT_PATTERN.captures(line.trim()) else {
        return LineClass::Rejected(LineRejection::Unrecognized);
    };

    LineClass::EventRow(RawEventFields {
        baseline_time: captures["time"].to_string(),
        course: captures["course"].to_string(),
        time_type: captures["time_type"].to_string(),
        time_dropped: captures["delta"].to_string(),
        distance: captures["distance"].to_string(),
        stroke: captures["stroke"].to_string(),
        date: captures["date"].to_string(),
        meet: captures["meet"].trim().to_string(),
    })
}
