//! PDF reading and loading operations.
//!
//! Loading is blocking work inside `lopdf`; the async entry points run it on
//! tokio's blocking pool. Batch loading keeps input order and stops at the
//! first document that cannot be read.
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolkit::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let loaded = reader.load_all(&paths, 4).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// PDF reader. Documents without pages are rejected.
#[derive(Debug, Clone, Copy)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document on the current thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnreadable`] if:
    /// - The file does not exist or is not a regular file
    /// - The file is not a valid PDF
    /// - The PDF has no pages (unless verification is disabled)
    pub fn load_blocking(&self, path: &Path) -> Result<LoadedPdf> {
        let start = Instant::now();

        if !path.exists() {
            return Err(Error::source_unreadable(path, "File not found"));
        }

        if !path.is_file() {
            return Err(Error::source_unreadable(path, "Not a file"));
        }

        let document = Document::load(path).map_err(|e| {
            let err_msg = e.to_string();
            warn!(path = %path.display(), error = %err_msg, "failed to load PDF");
            if err_msg.contains("encrypt") || err_msg.contains("password") {
                Error::source_unreadable(
                    path,
                    format!("PDF is encrypted ({err_msg}); decrypt it first"),
                )
            } else {
                Error::source_unreadable(path, err_msg)
            }
        })?;

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(Error::source_unreadable(path, "PDF has no pages"));
        }

        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let load_time = start.elapsed();

        debug!(
            path = %path.display(),
            pages = page_count,
            bytes = file_size,
            elapsed_ms = load_time.as_millis() as u64,
            "loaded PDF"
        );

        Ok(LoadedPdf {
            document,
            path: path.to_path_buf(),
            page_count,
            load_time,
            file_size,
        })
    }

    /// Load a single PDF document without blocking the async runtime.
    ///
    /// # Errors
    ///
    /// Same as [`PdfReader::load_blocking`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdftoolkit::io::reader::PdfReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load(Path::new("document.pdf")).await?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let reader = self.clone();
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || reader.load_blocking(&path_buf))
            .await
            .map_err(|e| Error::Io {
                source: std::io::Error::other(format!("Load task failed: {e}")),
            })?
    }

    /// Load several documents, at most `workers` at a time.
    ///
    /// Results come back in the order of `paths`. The first document that
    /// fails (in that order) aborts the whole batch.
    pub async fn load_all(&self, paths: &[PathBuf], workers: usize) -> Result<Vec<LoadedPdf>> {
        use futures::stream::{self, StreamExt, TryStreamExt};

        let workers = workers.max(1);

        let tasks = paths.iter().map(|path| {
            let path = path.clone();
            let reader = self.clone();
            async move { reader.load(&path).await }
        });

        stream::iter(tasks)
            .buffered(workers)
            .try_collect::<Vec<_>>()
            .await
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}
