//! Document parser
//!
//! Drives the [`LineClassifier`] across every line of every page of one
//! document while tracking which swimmer is in scope. Rejected lines are
//! counted and logged, never fatal.

use std::collections::HashSet;
use tracing::{debug, info};

use super::classifier::{LineClass, LineClassifier, LineRejection};
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{SwimEventRecord, SwimmerContext};
use crate::config::ParserConfig;

/// Parser state between lines
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ParserState {
    #[default]
    NoActiveSwimmer,
    ActiveSwimmer(SwimmerContext),
}

impl ParserState {
    pub fn context(&self) -> Option<&SwimmerContext> {
        match self {
            ParserState::NoActiveSwimmer => None,
            ParserState::ActiveSwimmer(context) => Some(context),
        }
    }
}

/// Parser for improved-time report text
///
/// Holds no per-document state, so one parser can be shared across documents
/// and threads.
#[derive(Debug, Clone)]
pub struct DocumentParser {
    classifier: LineClassifier,
    config: ParserConfig,
}

impl DocumentParser {
    /// Create a parser from configuration
    pub fn new(config: ParserConfig) -> Self {
        Self {
            classifier: LineClassifier::new(&config),
            config,
        }
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Parse the pages of one document, each an ordered list of lines
    pub fn parse_pages<P, S>(&self, pages: &[P]) -> ParseResult
    where
        P: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut run = ParseRun::default();

        for (page_index, page) in pages.iter().enumerate() {
            if self.config.reset_context_per_page {
                run.state = ParserState::NoActiveSwimmer;
            }

            let skip = if page_index == 0 {
                self.config.first_page_skip()
            } else {
                self.config.page_skip()
            };

            for (line_index, line) in page.as_ref().iter().enumerate() {
                run.line_number += 1;
                run.stats.total_lines += 1;

                if line_index < skip {
                    run.stats.skipped_lines += 1;
                    continue;
                }

                self.step(&mut run, line.as_ref());
            }
        }

        run.finish()
    }

    /// Parse a single page of lines
    pub fn parse_lines<I, S>(&self, lines: I) -> ParseResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let page: Vec<S> = lines.into_iter().collect();
        self.parse_pages(&[page])
    }

    /// Advance the state machine by one line
    fn step(&self, run: &mut ParseRun, line: &str) {
        match self.classifier.classify(line, run.state.context()) {
            LineClass::BlankOrNoise => run.stats.noise_lines += 1,
            LineClass::SwimmerHeader(context) => {
                debug!(
                    "Line {}: swimmer {} ({}) {}",
                    run.line_number, context.name, context.age, context.gender
                );
                run.stats.swimmer_headers += 1;
                run.swimmers.insert(context.name.clone());
                run.state = ParserState::ActiveSwimmer(context);
            }
            LineClass::EventRow(raw) => {
                let Some(context) = run.state.context() else {
                    run.reject(LineRejection::Unrecognized);
                    return;
                };

                match SwimEventRecord::from_raw(context, &raw) {
                    Ok(record) => {
                        run.stats.records_parsed += 1;
                        run.records.push(record);
                    }
                    Err(e) => run.reject(LineRejection::FieldValidation(e)),
                }
            }
            LineClass::Rejected(rejection) => {
                // Rows after a bad header must not land on the previous swimmer
                if matches!(rejection, LineRejection::InvalidHeader(_)) {
                    run.state = ParserState::NoActiveSwimmer;
                }
                run.reject(rejection);
            }
        }
    }
}

/// Mutable state of one parse pass
#[derive(Debug, Default)]
struct ParseRun {
    state: ParserState,
    line_number: usize,
    records: Vec<SwimEventRecord>,
    swimmers: HashSet<String>,
    stats: ParseStats,
}

impl ParseRun {
    fn reject(&mut self, rejection: LineRejection) {
        debug!("Skipped line {}: {}", self.line_number, rejection);
        self.stats.record_rejection(self.line_number, &rejection);
    }

    fn finish(mut self) -> ParseResult {
        self.stats.distinct_swimmers = self.swimmers.len();
        info!(
            "Processed a total of {} swimmers, parsed {} records from {} lines",
            self.stats.distinct_swimmers, self.stats.records_parsed, self.stats.total_lines
        );

        ParseResult {
            records: self.records,
            stats: self.stats,
        }
    }
}
