//! Table file writer
//!
//! Writes the record and report frames of one source document side by side
//! in the output directory, named after the document's file stem.

use super::TableFormat;
use super::frames::write_csv;
use crate::constants::{RAW_TABLE_SUFFIX, REPORT_TABLE_SUFFIX};
use crate::{Error, Result};

use polars::prelude::{
    DataFrame, ParquetCompression, ParquetWriter as PolarsParquetWriter, StatisticsOptions,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Paths and sizes of the two tables written for one document
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenTables {
    pub raw_path: PathBuf,
    pub report_path: PathBuf,
    pub raw_rows: usize,
    pub report_rows: usize,
}

/// Writer for the per-document output tables
#[derive(Debug, Clone)]
pub struct TableWriter {
    output_dir: PathBuf,
    format: TableFormat,
    force_overwrite: bool,
}

impl TableWriter {
    /// Create a writer targeting `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>, format: TableFormat, force_overwrite: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
            force_overwrite,
        }
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    /// Output paths for a document stem: `(raw table, report table)`
    pub fn output_paths(&self, stem: &str) -> (PathBuf, PathBuf) {
        let extension = self.format.extension();
        (
            self.output_dir
                .join(format!("{}{}.{}", stem, RAW_TABLE_SUFFIX, extension)),
            self.output_dir
                .join(format!("{}{}.{}", stem, REPORT_TABLE_SUFFIX, extension)),
        )
    }

    /// Write both tables for one document
    ///
    /// Neither file is written when either already exists and overwriting
    /// was not requested.
    pub fn write_document(
        &self,
        stem: &str,
        records: &mut DataFrame,
        reports: &mut DataFrame,
    ) -> Result<WrittenTables> {
        let (raw_path, report_path) = self.output_paths(stem);

        if !self.force_overwrite {
            for path in [&raw_path, &report_path] {
                if path.exists() {
                    return Err(Error::output_exists(path.display().to_string()));
                }
            }
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::io(
                format!(
                    "Failed to create output directory {}",
                    self.output_dir.display()
                ),
                e,
            )
        })?;

        self.write_frame(records, &raw_path)?;
        self.write_frame(reports, &report_path)?;

        info!(
            "Wrote {} records to {} and {} reports to {}",
            records.height(),
            raw_path.display(),
            reports.height(),
            report_path.display()
        );

        Ok(WrittenTables {
            raw_rows: records.height(),
            report_rows: reports.height(),
            raw_path,
            report_path,
        })
    }

    fn write_frame(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        debug!("Writing {} rows to {}", df.height(), path.display());

        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

        match self.format {
            TableFormat::Csv => write_csv(df, file),
            TableFormat::Parquet => PolarsParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .with_statistics(StatisticsOptions::full())
                .finish(df)
                .map(|_| ())
                .map_err(|e| {
                    Error::table(format!("Failed to write Parquet {}", path.display()), e)
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::table_writer::{records_to_frame, reports_to_frame};
    use crate::constants::{record_columns, report_columns};
    use polars::prelude::{ParquetReader, SerReader};
    use tempfile::TempDir;

    fn empty_frames() -> (DataFrame, DataFrame) {
        (
            records_to_frame(&[]).unwrap(),
            reports_to_frame(&[]).unwrap(),
        )
    }

    #[test]
    fn test_output_paths() {
        let writer = TableWriter::new("/tmp/out", TableFormat::Csv, false);
        let (raw, report) = writer.output_paths("june_meet");

        assert_eq!(raw, PathBuf::from("/tmp/out/june_meet_raw.csv"));
        assert_eq!(report, PathBuf::from("/tmp/out/june_meet_report.csv"));

        let writer = TableWriter::new("/tmp/out", TableFormat::Parquet, false);
        let (raw, _) = writer.output_paths("june_meet");
        assert_eq!(raw, PathBuf::from("/tmp/out/june_meet_raw.parquet"));
    }

    #[test]
    fn test_write_csv_tables() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("nested");
        let writer = TableWriter::new(&output_dir, TableFormat::Csv, false);

        let (mut records, mut reports) = empty_frames();
        let written = writer
            .write_document("meet", &mut records, &mut reports)
            .unwrap();

        assert_eq!(written.raw_rows, 0);
        let raw = std::fs::read_to_string(&written.raw_path).unwrap();
        let report = std::fs::read_to_string(&written.report_path).unwrap();
        assert_eq!(raw.trim_end(), record_columns::ALL.join(","));
        assert_eq!(report.trim_end(), report_columns::ALL.join(","));
    }

    #[test]
    fn test_write_parquet_tables() {
        let temp_dir = TempDir::new().unwrap();
        let writer = TableWriter::new(temp_dir.path(), TableFormat::Parquet, false);

        let (mut records, mut reports) = empty_frames();
        let written = writer
            .write_document("meet", &mut records, &mut reports)
            .unwrap();

        let file = File::open(&written.report_path).unwrap();
        let df = ParquetReader::new(file).finish().unwrap();
        assert_eq!(df.width(), report_columns::ALL.len());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let writer = TableWriter::new(temp_dir.path(), TableFormat::Csv, false);

        let (_, report_path) = writer.output_paths("meet");
        std::fs::write(&report_path, "existing").unwrap();

        let (mut records, mut reports) = empty_frames();
        let result = writer.write_document("meet", &mut records, &mut reports);

        assert!(matches!(result, Err(Error::OutputExists { .. })));
        assert!(!temp_dir.path().join("meet_raw.csv").exists());
        assert_eq!(std::fs::read_to_string(&report_path).unwrap(), "existing");
    }

    #[test]
    fn test_force_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let writer = TableWriter::new(temp_dir.path(), TableFormat::Csv, true);

        let (_, report_path) = writer.output_paths("meet");
        std::fs::write(&report_path, "existing").unwrap();

        let (mut records, mut reports) = empty_frames();
        writer
            .write_document("meet", &mut records, &mut reports)
            .unwrap();

        assert_ne!(std::fs::read_to_string(&report_path).unwrap(), "existing");
    }
}
