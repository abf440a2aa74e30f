//! Source documents as pages of text lines
//!
//! Meet-results reports arrive either as PDFs or as text already extracted
//! from them. Both are reduced to the same shape: an ordered list of pages,
//! each an ordered list of lines.
//!
//! - `.pdf` files are read with `lopdf`, one page at a time.
//! - `.txt` files are split into pages on form feed characters, the
//!   separator `pdftotext` writes between pages.

use crate::constants::PAGE_SEPARATOR;
use crate::{Error, Result};
use lopdf::Document;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Text of one source document
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub pages: Vec<Vec<String>>,
}

impl SourceDocument {
    /// File stem used to name the output tables
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

/// Kind of source inferred from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    Text,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" => Some(SourceKind::Text),
            _ => None,
        }
    }
}

/// Load a document as pages of lines
pub fn load_document(path: &Path) -> Result<SourceDocument> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let kind = SourceKind::from_path(path).ok_or_else(|| {
        Error::text_extraction(
            path.display().to_string(),
            "unsupported file type, expected .pdf or .txt",
        )
    })?;

    let pages = match kind {
        SourceKind::Pdf => pdf_pages(path)?,
        SourceKind::Text => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
            pages_from_text(&text)
        }
    };

    debug!(
        "Loaded {} pages from {}",
        pages.len(),
        path.display()
    );

    Ok(SourceDocument {
        path: path.to_path_buf(),
        pages,
    })
}

/// Split extracted text into pages of lines
///
/// A trailing page separator does not start an extra empty page.
pub fn pages_from_text(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_suffix(PAGE_SEPARATOR).unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }

    text.split(PAGE_SEPARATOR)
        .map(|page| page.lines().map(str::to_string).collect())
        .collect()
}

fn pdf_pages(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = path.display().to_string();
    let document = Document::load(path)
        .map_err(|e| Error::text_extraction(&file, format!("failed to open PDF: {}", e)))?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().into_keys() {
        match document.extract_text(&[page_number]) {
            Ok(text) => pages.push(text.lines().map(str::to_string).collect()),
            Err(e) => {
                // Keep page numbering intact for the parser
                warn!("No text extracted from page {} of {}: {}", page_number, file, e);
                pages.push(Vec::new());
            }
        }
    }

    Ok(pages)
}
