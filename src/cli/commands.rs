//! Command implementations for the most-improved CLI
//!
//! This module contains document discovery, the per-document pipeline,
//! concurrent execution with progress reporting and the run summary.

use crate::app::adapters::text_source::load_document;
use crate::app::models::ImprovementReport;
use crate::app::services::line_parser::{DocumentParser, ParseStats};
use crate::app::services::record_processor::{
    ProcessingStats, RecordProcessor, rank_by_average_percentage,
};
use crate::app::services::table_writer::{
    TableWriter, WrittenTables, records_to_frame, reports_to_frame, write_csv,
};
use crate::cli::args::{Commands, ParseArgs, ProcessArgs, ReportFormat};
use crate::config::Config;
use crate::{Error, Result};

use colored::Colorize;
use futures::stream::{self, StreamExt};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Number of swimmers listed in the human-readable summary
const SUMMARY_TOP_SWIMMERS: usize = 5;

/// Result of running the pipeline on one document
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub path: PathBuf,
    pub parse_stats: ParseStats,
    pub processing_stats: ProcessingStats,
    pub reports: Vec<ImprovementReport>,
    /// `None` in dry-run mode
    pub written: Option<WrittenTables>,
}

/// Statistics for a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub documents_found: usize,
    pub outcomes: Vec<DocumentOutcome>,
    pub failures: Vec<(PathBuf, String)>,
    pub dry_run: bool,
    pub processing_time: Duration,
}

impl RunSummary {
    pub fn documents_processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn records_parsed(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| o.parse_stats.records_parsed)
            .sum()
    }

    pub fn rejected_lines(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| o.parse_stats.rejected_lines())
            .sum()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| o.processing_stats.duplicates_removed)
            .sum()
    }

    pub fn records_written(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| o.processing_stats.deduplicated)
            .sum()
    }

    pub fn swimmers_reported(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| o.processing_stats.swimmers_reported)
            .sum()
    }

    /// Reports of every document, most improved first
    pub fn ranked_reports(&self) -> Vec<&ImprovementReport> {
        rank_by_average_percentage(self.outcomes.iter().flat_map(|o| o.reports.iter()))
    }
}

/// Main command runner
pub async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Process(args) => {
            let summary = run_process(args.clone()).await?;
            generate_final_report(&args, &summary)
        }
        Commands::Parse(args) => run_parse(args).await,
    }
}

/// Process every document in the input directory
///
/// 1. Set up logging and configuration
/// 2. Discover documents
/// 3. Run the pipeline on each document with at most `workers` in flight
/// 4. Collect per-document outcomes and failures
pub async fn run_process(args: ProcessArgs) -> Result<RunSummary> {
    let start_time = Instant::now();

    args.validate()?;

    let config = load_configuration(args.config_file.as_deref(), |config| {
        apply_cli_overrides(config, &args)
    })?;

    setup_logging(&config.logging.level, !config.logging.structured);

    info!("Starting most-improved processor");
    debug!("Command line arguments: {:?}", args);
    debug!("Loaded configuration: {:?}", config);

    if !config.processing.dry_run {
        config.ensure_output_directory()?;
    }

    let documents = discover_documents(
        &config.processing.input_path,
        &config.processing.file_patterns,
        config.processing.recursive,
    )?;
    info!(
        "Found {} documents in {}",
        documents.len(),
        config.processing.input_path.display()
    );

    if documents.is_empty() {
        warn!(
            "No documents matching {:?} in {}",
            config.processing.file_patterns,
            config.processing.input_path.display()
        );
    }

    let progress_bar = args
        .show_progress()
        .then(|| create_progress_bar(documents.len() as u64));

    let mut summary = RunSummary {
        documents_found: documents.len(),
        dry_run: config.processing.dry_run,
        ..Default::default()
    };

    let workers = config.performance.parallel_workers;
    let config = Arc::new(config);

    let results: Vec<(PathBuf, Result<DocumentOutcome>)> =
        stream::iter(documents.into_iter().map(|path| {
            let config = Arc::clone(&config);
            async move {
                let task_path = path.clone();
                let result =
                    tokio::task::spawn_blocking(move || process_document(&task_path, &config))
                        .await
                        .map_err(|e| Error::task(format!("{}: {}", path.display(), e)))
                        .and_then(|outcome| outcome);
                (path, result)
            }
        }))
        .buffer_unordered(workers)
        .inspect(|(path, _)| {
            if let Some(pb) = &progress_bar {
                pb.inc(1);
                pb.set_message(display_name(path));
            }
        })
        .collect()
        .await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Processing complete");
    }

    for (path, result) in results {
        match result {
            Ok(outcome) => summary.outcomes.push(outcome),
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                summary.failures.push((path, e.to_string()));
            }
        }
    }

    summary.outcomes.sort_by(|a, b| a.path.cmp(&b.path));
    summary.failures.sort_by(|a, b| a.0.cmp(&b.0));
    summary.processing_time = start_time.elapsed();

    info!(
        "Run complete: {} of {} documents processed, {} failed",
        summary.documents_processed(),
        summary.documents_found,
        summary.failures.len()
    );

    Ok(summary)
}

/// Parse one document and print both tables as CSV
async fn run_parse(args: ParseArgs) -> Result<()> {
    args.validate()?;

    let config = load_configuration(args.config_file.as_deref(), |config| {
        if args.verbose > 0 {
            config.logging.level = args.get_log_level().to_string();
        }
        if let Some(strategy) = args.strategy {
            config.parser = config.parser.clone().with_dialect(strategy);
        }
        if args.reset_per_page {
            config.parser.reset_context_per_page = true;
        }
        if let Some(divisor) = args.divisor {
            config.report.normalization_divisor = divisor;
        }
        Ok(())
    })?;

    setup_logging(&config.logging.level, !config.logging.structured);

    let path = args.file.clone();
    let (parse_stats, result) = tokio::task::spawn_blocking(move || -> Result<_> {
        let document = load_document(&path)?;
        let parsed = DocumentParser::new(config.parser.clone()).parse_pages(&document.pages);
        let processed = RecordProcessor::new(config.report.clone()).process_records(parsed.records);
        Ok((parsed.stats, processed))
    })
    .await
    .map_err(|e| Error::task(e.to_string()))??;

    info!("{}", parse_stats.summary());

    let stdout = std::io::stdout();
    let mut records = records_to_frame(&result.records)?;
    write_csv(&mut records, stdout.lock())?;
    println!();
    let mut reports = reports_to_frame(&result.reports)?;
    write_csv(&mut reports, stdout.lock())?;

    Ok(())
}

/// Run the full pipeline on one document
///
/// Loads the text, parses it, deduplicates and aggregates the records and,
/// unless this is a dry run, writes the two output tables.
pub fn process_document(path: &Path, config: &Config) -> Result<DocumentOutcome> {
    let document = load_document(path)?;
    debug!(
        "{}: {} pages, {} lines",
        path.display(),
        document.page_count(),
        document.line_count()
    );

    let parsed = DocumentParser::new(config.parser.clone()).parse_pages(&document.pages);
    info!("{}: {}", display_name(path), parsed.stats.summary());

    let parse_stats = parsed.stats;
    let processed = RecordProcessor::new(config.report.clone()).process_records(parsed.records);

    let written = if config.processing.dry_run {
        let writer = table_writer(config);
        let (raw, report) = writer.output_paths(&document.stem());
        info!("Would create: {} and {}", raw.display(), report.display());
        None
    } else {
        let mut records = records_to_frame(&processed.records)?;
        let mut reports = reports_to_frame(&processed.reports)?;
        Some(table_writer(config).write_document(&document.stem(), &mut records, &mut reports)?)
    };

    Ok(DocumentOutcome {
        path: path.to_path_buf(),
        parse_stats,
        processing_stats: processed.stats,
        reports: processed.reports,
        written,
    })
}

fn table_writer(config: &Config) -> TableWriter {
    TableWriter::new(
        &config.processing.output_path,
        config.processing.output_format,
        config.processing.force_overwrite,
    )
}

/// Find source documents whose file names match any pattern
///
/// Results are sorted so runs are reproducible.
pub fn discover_documents(
    input_dir: &Path,
    patterns: &[String],
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(Error::file_not_found(input_dir.display().to_string()));
    }

    let patterns = patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(|e| Error::pattern(p.clone(), e)))
        .collect::<Result<Vec<_>>>()?;

    let walker = WalkDir::new(input_dir).min_depth(1);
    let walker = if recursive {
        walker
    } else {
        walker.max_depth(1)
    };

    let mut documents = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to scan {}", input_dir.display()), e)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if patterns.iter().any(|p| p.matches(&name)) {
            documents.push(entry.into_path());
        }
    }

    documents.sort();
    Ok(documents)
}

/// Set up structured logging
///
/// A subscriber installed earlier in the process (tests, embedding
/// applications) is left in place.
fn setup_logging(log_level: &str, compact: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("most_improved={}", log_level)));

    let result = if compact {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    match result {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(e) => debug!("Keeping existing logging subscriber: {}", e),
    }
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration<F>(config_file: Option<&Path>, overrides: F) -> Result<Config>
where
    F: FnOnce(&mut Config) -> Result<()>,
{
    let default_config_path = if config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = config_file.or_else(|| {
        default_config_path
            .as_deref()
            .filter(|path| path.exists())
    });

    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults and environment variables"),
    }

    let mut config = Config::load_layered(config_file)?;

    overrides(&mut config)?;

    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &ProcessArgs) -> Result<()> {
    if let Some(input) = &args.input_path {
        config.processing.input_path = input.clone();
    }
    if let Some(output) = &args.output_path {
        config.processing.output_path = output.clone();
    }
    if !args.patterns.is_empty() {
        config.processing.file_patterns = args.patterns.clone();
    }
    if let Some(format) = args.format {
        config.processing.output_format = format;
    }
    config.processing.recursive |= args.recursive;
    config.processing.force_overwrite |= args.force_overwrite;
    config.processing.dry_run |= args.dry_run;

    if let Some(strategy) = args.strategy {
        config.parser = config.parser.clone().with_dialect(strategy);
    }
    config.parser.reset_context_per_page |= args.reset_per_page;

    if let Some(divisor) = args.divisor {
        config.report.normalization_divisor = divisor;
    }
    if let Some(workers) = args.workers {
        config.performance.parallel_workers = workers;
    }

    if args.quiet {
        config.logging.level = args.get_log_level().to_string();
        config.logging.structured = false;
    } else if args.verbose > 0 {
        config.logging.level = args.get_log_level().to_string();
    }

    Ok(())
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");

    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb.set_message("Reading documents...");
    pb
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Print the run summary in the requested format
fn generate_final_report(args: &ProcessArgs, summary: &RunSummary) -> Result<()> {
    match args.report {
        ReportFormat::Human => {
            if !args.quiet {
                generate_human_report(summary);
            }
            Ok(())
        }
        ReportFormat::Json => generate_json_report(summary),
        ReportFormat::Csv => {
            generate_csv_report(summary);
            Ok(())
        }
    }
}

fn generate_human_report(summary: &RunSummary) {
    let title = if summary.dry_run {
        "Dry run complete (no tables written)"
    } else {
        "Processing complete"
    };

    println!("\n{}", title.green().bold());
    println!("{}", "=".repeat(44));
    println!("Documents processed:  {}", summary.documents_processed());
    println!("Records parsed:       {}", summary.records_parsed());
    println!("Duplicates removed:   {}", summary.duplicates_removed());
    println!("Records kept:         {}", summary.records_written());
    println!("Swimmers reported:    {}", summary.swimmers_reported());
    println!("Lines rejected:       {}", summary.rejected_lines());
    println!(
        "Processing time:      {}",
        HumanDuration(summary.processing_time)
    );

    if !summary.failures.is_empty() {
        println!(
            "\n{}",
            format!("Failed documents: {}", summary.failures.len())
                .red()
                .bold()
        );
        for (path, reason) in &summary.failures {
            println!("  {} {}", display_name(path).red(), reason);
        }
    }

    let ranked = summary.ranked_reports();
    if !ranked.is_empty() {
        println!("\n{}", "Most improved (average % time dropped):".bold());
        for report in ranked.iter().take(SUMMARY_TOP_SWIMMERS) {
            println!(
                "  {:<30} {:>3} {}  {:>8.2}%  total {:>8.2}s",
                report.name.cyan(),
                report.age,
                report.gender,
                report.average_percentage_time_dropped,
                report.total_time_dropped
            );
        }
    }

    let written: Vec<&WrittenTables> = summary
        .outcomes
        .iter()
        .filter_map(|o| o.written.as_ref())
        .collect();
    if !written.is_empty() {
        println!("\n{}", "Output files:".bold());
        for tables in written {
            println!("  {} ({} rows)", tables.raw_path.display(), tables.raw_rows);
            println!(
                "  {} ({} rows)",
                tables.report_path.display(),
                tables.report_rows
            );
        }
    }

    println!();
}

fn generate_json_report(summary: &RunSummary) -> Result<()> {
    let json = serde_json::json!({
        "dry_run": summary.dry_run,
        "documents_found": summary.documents_found,
        "documents_processed": summary.documents_processed(),
        "documents_failed": summary.failures.len(),
        "records_parsed": summary.records_parsed(),
        "duplicates_removed": summary.duplicates_removed(),
        "records_kept": summary.records_written(),
        "swimmers_reported": summary.swimmers_reported(),
        "lines_rejected": summary.rejected_lines(),
        "processing_time_seconds": summary.processing_time.as_secs_f64(),
        "documents": summary.outcomes.iter().map(|o| {
            serde_json::json!({
                "path": o.path.display().to_string(),
                "parse": o.parse_stats,
                "processing": o.processing_stats,
                "raw_table": o.written.as_ref().map(|w| w.raw_path.display().to_string()),
                "report_table": o.written.as_ref().map(|w| w.report_path.display().to_string()),
            })
        }).collect::<Vec<_>>(),
        "failures": summary.failures.iter().map(|(path, reason)| {
            serde_json::json!({
                "path": path.display().to_string(),
                "reason": reason,
            })
        }).collect::<Vec<_>>(),
    });

    let rendered = serde_json::to_string_pretty(&json).map_err(|e| Error::report(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

fn generate_csv_report(summary: &RunSummary) {
    println!("metric,value");
    println!("documents_found,{}", summary.documents_found);
    println!("documents_processed,{}", summary.documents_processed());
    println!("documents_failed,{}", summary.failures.len());
    println!("records_parsed,{}", summary.records_parsed());
    println!("duplicates_removed,{}", summary.duplicates_removed());
    println!("records_kept,{}", summary.records_written());
    println!("swimmers_reported,{}", summary.swimmers_reported());
    println!("lines_rejected,{}", summary.rejected_lines());
    println!(
        "processing_time_seconds,{}",
        summary.processing_time.as_secs_f64()
    );
}
