//! Output tables for processed documents
//!
//! Converts deduplicated records and improvement reports into `polars`
//! data frames and writes them next to each other as
//! `<source>_raw.<ext>` and `<source>_report.<ext>`.
//!
//! - [`frames`] - DataFrame construction with the fixed output columns
//! - [`writer`] - File naming, overwrite protection and CSV/Parquet output

pub mod frames;
pub mod writer;

pub use frames::{records_to_frame, reports_to_frame, write_csv};
pub use writer::{TableWriter, WrittenTables};

use serde::{Deserialize, Serialize};

/// File format of the written tables
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Csv,
    /// Snappy-compressed Parquet
    Parquet,
}

impl TableFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
        }
    }
}
