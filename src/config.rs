//! Configuration management and validation.
//!
//! Provides configuration structures for input discovery, parsing dialects,
//! report computation and runtime behaviour. Configuration is layered:
//! built-in defaults, then an optional TOML file, then environment
//! variables, then command-line overrides applied by the CLI.

use crate::app::services::line_parser::ParseStrategy;
use crate::app::services::table_writer::TableFormat;
use crate::constants::{
    DEFAULT_FILE_PATTERNS, DEFAULT_INPUT_DIR, DEFAULT_NOISE_MARKERS,
    DEFAULT_NORMALIZATION_DIVISOR, DEFAULT_OUTPUT_DIR, ENV_DIVISOR, ENV_INPUT, ENV_OUTPUT,
    ENV_WORKERS, MAX_PARALLEL_WORKERS, PATTERN_DIALECT_FIRST_PAGE_SKIP, PATTERN_DIALECT_PAGE_SKIP,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub parser: ParserConfig,
    pub report: ReportConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

/// Input discovery and output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Directory scanned for source documents
    pub input_path: PathBuf,

    /// Directory receiving `<source>_raw` and `<source>_report` tables
    pub output_path: PathBuf,

    /// File name glob patterns selecting source documents
    pub file_patterns: Vec<String>,

    /// Descend into subdirectories of the input directory
    pub recursive: bool,

    /// Table file format
    pub output_format: TableFormat,

    /// Overwrite existing output tables
    pub force_overwrite: bool,

    /// Parse documents and report results without writing tables
    pub dry_run: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_patterns: DEFAULT_FILE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            recursive: false,
            output_format: TableFormat::Csv,
            force_overwrite: false,
            dry_run: false,
        }
    }
}

/// Line parsing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Layout dialect of the source text
    pub strategy: ParseStrategy,

    /// Lines containing any of these substrings are ignored
    pub noise_markers: Vec<String>,

    /// Replace the extractor's ligature glyph with `f` before classification
    pub fix_ligatures: bool,

    /// Forget the current swimmer at every page boundary
    pub reset_context_per_page: bool,

    /// Leading lines of the first page dropped unread; unset uses the dialect's banner length
    pub skip_lines_first_page: Option<usize>,

    /// Leading lines of every later page dropped unread; unset uses the dialect's banner length
    pub skip_lines_per_page: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strategy: ParseStrategy::Columns,
            noise_markers: DEFAULT_NOISE_MARKERS.iter().map(|m| m.to_string()).collect(),
            fix_ligatures: true,
            reset_context_per_page: false,
            skip_lines_first_page: None,
            skip_lines_per_page: None,
        }
    }
}

impl ParserConfig {
    /// Settings for the regex dialect, whose pages open with a fixed block of title lines
    pub fn pattern_dialect() -> Self {
        Self::default().with_dialect(ParseStrategy::Pattern)
    }

    /// Use a different layout dialect
    pub fn with_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Switch dialect and fall back to that dialect's page banner lengths
    pub fn with_dialect(self, strategy: ParseStrategy) -> Self {
        Self {
            strategy,
            skip_lines_first_page: None,
            skip_lines_per_page: None,
            ..self
        }
    }

    /// Lines skipped at the top of page one
    pub fn first_page_skip(&self) -> usize {
        self.skip_lines_first_page
            .unwrap_or_else(|| dialect_banner_lengths(self.strategy).0)
    }

    /// Lines skipped at the top of every later page
    pub fn page_skip(&self) -> usize {
        self.skip_lines_per_page
            .unwrap_or_else(|| dialect_banner_lengths(self.strategy).1)
    }

    /// Forget the current swimmer at page boundaries
    pub fn with_page_reset(mut self) -> Self {
        self.reset_context_per_page = true;
        self
    }
}

/// Banner lines opening the first and later pages of each dialect
fn dialect_banner_lengths(strategy: ParseStrategy) -> (usize, usize) {
    match strategy {
        ParseStrategy::Columns => (0, 0),
        ParseStrategy::Pattern => (PATTERN_DIALECT_FIRST_PAGE_SKIP, PATTERN_DIALECT_PAGE_SKIP),
    }
}

/// Improvement report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Divisor of the summed percentage time dropped
    pub normalization_divisor: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            normalization_divisor: DEFAULT_NORMALIZATION_DIVISOR,
        }
    }
}

/// Concurrency settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Documents processed at the same time
    pub parallel_workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_workers: num_cpus::get().clamp(1, MAX_PARALLEL_WORKERS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate's events; `-v`/`-q` override it and `RUST_LOG` replaces the filter
    pub level: String,
    /// Timestamped output; compact output when false
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            structured: true,
        }
    }
}

impl Config {
    /// Default configuration file location
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("most-improved").join("config.toml"))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| Error::config_parse(path.display().to_string(), e))
    }

    /// Load configuration from defaults, an optional file and the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        debug!("Layered configuration loaded: {:?}", config);

        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup(ENV_INPUT) {
            self.processing.input_path = PathBuf::from(input);
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.processing.output_path = PathBuf::from(output);
        }
        if let Some(workers) = lookup(ENV_WORKERS) {
            self.performance.parallel_workers = workers.trim().parse().map_err(|_| {
                Error::configuration(format!("{} must be an integer, got '{}'", ENV_WORKERS, workers))
            })?;
        }
        if let Some(divisor) = lookup(ENV_DIVISOR) {
            self.report.normalization_divisor = divisor.trim().parse().map_err(|_| {
                Error::configuration(format!("{} must be a number, got '{}'", ENV_DIVISOR, divisor))
            })?;
        }

        Ok(())
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        let divisor = self.report.normalization_divisor;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(Error::configuration(format!(
                "Normalization divisor must be a positive number, got {}",
                divisor
            )));
        }

        let workers = self.performance.parallel_workers;
        if workers == 0 || workers > MAX_PARALLEL_WORKERS {
            return Err(Error::configuration(format!(
                "Parallel workers must be between 1 and {}, got {}",
                MAX_PARALLEL_WORKERS, workers
            )));
        }

        if self.processing.file_patterns.is_empty() {
            return Err(Error::configuration(
                "At least one input file pattern is required",
            ));
        }

        for pattern in &self.processing.file_patterns {
            glob::Pattern::new(pattern).map_err(|e| Error::pattern(pattern.clone(), e))?;
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(Error::configuration(format!(
                    "Unknown log level '{}'",
                    other
                )));
            }
        }

        Ok(())
    }

    /// Create the output directory if it does not exist
    pub fn ensure_output_directory(&self) -> Result<()> {
        let output = &self.processing.output_path;
        if !output.exists() {
            std::fs::create_dir_all(output).map_err(|e| {
                Error::io(
                    format!("Failed to create output directory {}", output.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}
