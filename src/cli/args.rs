//! Command-line argument definitions for the most-improved processor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::services::line_parser::ParseStrategy;
use crate::app::services::table_writer::TableFormat;
use crate::constants::MAX_PARALLEL_WORKERS;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the most-improved processor
///
/// Reads meet-results documents, extracts every improved time per swimmer
/// and reports which swimmers dropped the most time.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "most-improved",
    version,
    about = "Extract improved swim times from meet results and rank the most improved swimmers",
    long_about = "Reads improved-time reports exported from meet management software (as PDF \
                  or as extracted text), rebuilds one record per swimmer and event, removes \
                  duplicate listings and writes a per-swimmer improvement summary next to the \
                  raw records as CSV or Parquet tables."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process every matching document in a directory and write tables (main command)
    Process(ProcessArgs),
    /// Parse a single document and print its tables to stdout
    Parse(ParseArgs),
}

/// Arguments for the process command
#[derive(Debug, Clone, Default, Parser)]
pub struct ProcessArgs {
    /// Directory containing source documents
    ///
    /// If not specified, defaults to ./.data
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        help = "Directory containing source documents"
    )]
    pub input_path: Option<PathBuf>,

    /// Directory receiving the generated tables
    ///
    /// Will be created if it doesn't exist. Each document `meet.pdf` produces
    /// `meet_raw.<ext>` and `meet_report.<ext>`. If not specified, defaults
    /// to ./.output
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Directory receiving the generated tables"
    )]
    pub output_path: Option<PathBuf>,

    /// File name patterns selecting source documents (repeatable)
    #[arg(
        long = "pattern",
        value_name = "GLOB",
        help = "File name pattern selecting documents, e.g. '*.pdf' (repeatable)"
    )]
    pub patterns: Vec<String>,

    /// Descend into subdirectories of the input directory
    #[arg(short = 'r', long = "recursive", help = "Search subdirectories too")]
    pub recursive: bool,

    /// Layout dialect of the documents
    #[arg(long = "strategy", value_enum, help = "Layout dialect of the documents")]
    pub strategy: Option<ParseStrategy>,

    /// Forget the current swimmer at every page boundary
    #[arg(
        long = "reset-per-page",
        help = "Forget the current swimmer at every page boundary"
    )]
    pub reset_per_page: bool,

    /// Table file format
    #[arg(long = "format", value_enum, help = "Table file format")]
    pub format: Option<TableFormat>,

    /// Divisor applied to the summed percentage time dropped
    #[arg(
        long = "divisor",
        value_name = "NUMBER",
        help = "Divisor applied to the summed percentage time dropped (default 5)"
    )]
    pub divisor: Option<f64>,

    /// Number of documents processed concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of documents processed concurrently"
    )]
    pub workers: Option<usize>,

    /// Force overwrite of existing output files
    #[arg(long = "force", help = "Force overwrite of existing output files")]
    pub force_overwrite: bool,

    /// Parse everything but write no tables
    #[arg(
        long = "dry-run",
        help = "Parse documents and report results without writing tables"
    )]
    pub dry_run: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/most-improved/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Format of the run summary printed to stdout
    #[arg(
        long = "report",
        value_enum,
        default_value = "human",
        help = "Format of the run summary"
    )]
    pub report: ReportFormat,

    /// Hide the progress bar
    #[arg(long = "no-progress", help = "Hide the progress bar")]
    pub no_progress: bool,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Document to parse (.pdf or .txt)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Layout dialect of the document
    #[arg(long = "strategy", value_enum, help = "Layout dialect of the document")]
    pub strategy: Option<ParseStrategy>,

    /// Forget the current swimmer at every page boundary
    #[arg(
        long = "reset-per-page",
        help = "Forget the current swimmer at every page boundary"
    )]
    pub reset_per_page: bool,

    /// Divisor applied to the summed percentage time dropped
    #[arg(long = "divisor", value_name = "NUMBER")]
    pub divisor: Option<f64>,

    /// Path to configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        // Validate input path exists (only if explicitly provided)
        if let Some(input_path) = &self.input_path {
            if !input_path.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    input_path.display()
                )));
            }

            if !input_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is not a directory: {}",
                    input_path.display()
                )));
            }
        }

        if let Some(workers) = self.workers {
            if workers == 0 || workers > MAX_PARALLEL_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers must be between 1 and {}",
                    MAX_PARALLEL_WORKERS
                )));
            }
        }

        validate_divisor(self.divisor)?;
        validate_config_file(self.config_file.as_ref())?;

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            verbosity_level(self.verbose)
        }
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress
    }
}

impl ParseArgs {
    /// Validate the parse command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.file.is_file() {
            return Err(Error::file_not_found(self.file.display().to_string()));
        }

        validate_divisor(self.divisor)?;
        validate_config_file(self.config_file.as_ref())?;

        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        verbosity_level(self.verbose)
    }
}

fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn validate_divisor(divisor: Option<f64>) -> Result<()> {
    match divisor {
        Some(d) if !d.is_finite() || d <= 0.0 => Err(Error::configuration(format!(
            "Divisor must be a positive number, got {}",
            d
        ))),
        _ => Ok(()),
    }
}

fn validate_config_file(config_file: Option<&PathBuf>) -> Result<()> {
    match config_file {
        Some(path) if !path.exists() => Err(Error::configuration(format!(
            "Config file does not exist: {}",
            path.display()
        ))),
        _ => Ok(()),
    }
}
