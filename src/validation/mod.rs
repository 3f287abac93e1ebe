//! Input and output validation for pdftoolkit.
//!
//! This module checks documents and destinations before any operation runs.
//! It performs:
//! - File existence and accessibility checks
//! - PDF format validation and page count extraction
//! - Output path and overwrite policy checks
//!
//! It also produces the per-document metadata summary shown by `info`.
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolkit::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let info = validator.validate_file(&PathBuf::from("test.pdf")).await?;
//! println!("{}", info.preview());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::OverwriteMode;
use crate::document::tree;
use crate::error::{Error, Result};
use crate::io::PdfReader;
use crate::utils::format_file_size;

/// Shown in place of a preview when a document cannot be read.
pub const PREVIEW_UNAVAILABLE: &str = "Could not read metadata";

/// Metadata summary of a single PDF file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    /// Path to the file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Number of objects in the PDF.
    pub object_count: usize,

    /// First page dimensions (width, height) in points.
    pub page_dimensions: Option<(f64, f64)>,
}

impl DocumentInfo {
    /// Collect the summary from a loaded document.
    pub fn from_document(path: PathBuf, doc: &Document, file_size: u64) -> Self {
        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.parse::<u8>().unwrap_or_default(),
                minor.parse::<u8>().unwrap_or_default(),
            )
        });

        let page_dimensions = tree::page_ids(doc)
            .first()
            .and_then(|&page_id| tree::media_box(doc, page_id).ok())
            .map(|[llx, lly, urx, ury]| ((urx - llx).abs(), (ury - lly).abs()));

        Self {
            path,
            page_count: doc.get_pages().len(),
            file_size,
            version,
            object_count: doc.objects.len(),
            page_dimensions,
        }
    }

    /// One-line summary, e.g. `Pages: 12 | Size: 48.3 KB`.
    pub fn preview(&self) -> String {
        format!(
            "Pages: {} | Size: {:.1} KB",
            self.page_count,
            self.file_size as f64 / 1024.0
        )
    }

    /// Format the file size as a human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Individual results, in input order.
    pub results: Vec<DocumentInfo>,

    /// Total number of pages across all files.
    pub total_pages: usize,

    /// Total file size in bytes.
    pub total_size: u64,
}

impl ValidationSummary {
    /// Create a summary from validation results.
    pub fn from_results(results: Vec<DocumentInfo>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();

        Self {
            results,
            total_pages,
            total_size,
        }
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for PDF files and output destinations.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    reader: PdfReader,
}

impl Validator {
    /// Create a new validator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a single PDF file and summarize it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnreadable`] if the file does not exist, is
    /// not a regular file, is empty, is not a valid PDF, or has no pages.
    pub async fn validate_file(&self, path: &Path) -> Result<DocumentInfo> {
        if !path.exists() {
            return Err(Error::source_unreadable(path, "File not found"));
        }

        if !path.is_file() {
            return Err(Error::source_unreadable(path, "Not a file"));
        }

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| Error::source_unreadable(path, e.to_string()))?;

        if metadata.len() == 0 {
            return Err(Error::source_unreadable(path, "File is empty"));
        }

        let loaded = self.reader.load(path).await?;
        Ok(DocumentInfo::from_document(
            loaded.path,
            &loaded.document,
            loaded.file_size,
        ))
    }

    /// Validate several files, stopping at the first failure.
    pub async fn validate_files(&self, paths: &[PathBuf]) -> Result<ValidationSummary> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.validate_file(path).await?);
        }
        Ok(ValidationSummary::from_results(results))
    }

    /// The preview line for `path`, or [`PREVIEW_UNAVAILABLE`].
    pub async fn preview(&self, path: &Path) -> String {
        match self.validate_file(path).await {
            Ok(info) => info.preview(),
            Err(_) => PREVIEW_UNAVAILABLE.to_string(),
        }
    }

    /// Validate the output path.
    ///
    /// Prompting for [`OverwriteMode::Prompt`] is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output file exists and the mode is [`OverwriteMode::NoClobber`]
    /// - Output path is a directory
    /// - Output directory doesn't exist or is not writable
    pub async fn validate_output(&self, output: &Path, mode: OverwriteMode) -> Result<()> {
        if output.is_dir() {
            return Err(Error::invalid_config(format!(
                "Output path is a directory: {}",
                output.display()
            )));
        }

        if output.exists() && mode == OverwriteMode::NoClobber {
            return Err(Error::output_exists(output));
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                return Err(Error::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }

            let metadata = tokio::fs::metadata(parent).await?;
            if metadata.permissions().readonly() {
                return Err(Error::invalid_config(format!(
                    "Output directory is not writable: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }
}
