//! PDF writing and saving operations.
//!
//! Every save is all-or-nothing: the document is serialized into a sibling
//! `<name>.tmp` file, flushed, and renamed over the destination. If any step
//! fails the temporary file is removed and the destination is left as it was.
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolkit::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, warn};

use crate::config::CompressionLevel;
use crate::error::{Error, Result};
use crate::utils::{format_file_size, temp_sibling};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compress content streams before writing.
    pub compress: bool,

    /// Drop unreachable objects and renumber the rest.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::from(CompressionLevel::default())
    }
}

impl From<CompressionLevel> for WriteOptions {
    fn from(level: CompressionLevel) -> Self {
        let (compress, optimize) = match level {
            CompressionLevel::None => (false, false),
            CompressionLevel::Standard => (true, false),
            CompressionLevel::Maximum => (true, true),
        };
        Self {
            compress,
            optimize,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Number of pages in the written document.
    pub page_count: usize,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer for a compression level.
    pub fn with_compression(level: CompressionLevel) -> Self {
        Self::with_options(level.into())
    }

    /// Save a PDF document to a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DestinationWriteFailed`] if the temporary file cannot
    /// be created, serialization fails, or the final rename fails.
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let writer = self.clone();
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || writer.save_blocking(doc, &path_buf))
            .await
            .map_err(|e| Error::Io {
                source: std::io::Error::other(format!("Write task failed: {e}")),
            })?
    }

    /// Save on the current thread.
    pub fn save_blocking(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if self.options.optimize {
            doc.prune_objects();
            doc.renumber_objects();
        }
        if self.options.compress {
            doc.compress();
        }

        let page_count = doc.get_pages().len();
        let temp_path = temp_sibling(path);

        if let Err(err) = self.write_and_rename(&mut doc, &temp_path, path) {
            if temp_path.exists()
                && let Err(cleanup) = std::fs::remove_file(&temp_path)
            {
                warn!(
                    path = %temp_path.display(),
                    error = %cleanup,
                    "failed to remove temporary file"
                );
            }
            return Err(err);
        }

        let write_time = start.elapsed();
        let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        debug!(
            path = %path.display(),
            pages = page_count,
            bytes = file_size,
            elapsed_ms = write_time.as_millis() as u64,
            "wrote PDF"
        );

        Ok(WriteStatistics {
            write_time,
            file_size,
            output_path: path.to_path_buf(),
            page_count,
            compressed: self.options.compress,
        })
    }

    fn write_and_rename(&self, doc: &mut Document, temp_path: &Path, path: &Path) -> Result<()> {
        let file =
            std::fs::File::create(temp_path).map_err(|e| Error::write_failed(temp_path, e))?;

        // The handle is dropped at the end of this block, before the rename.
        {
            let mut writer = std::io::BufWriter::with_capacity(self.options.buffer_size, file);

            doc.save_to(&mut writer)
                .map_err(|e| Error::write_failed(temp_path, std::io::Error::other(e)))?;

            writer
                .flush()
                .map_err(|e| Error::write_failed(temp_path, e))?;
        }

        std::fs::rename(temp_path, path).map_err(|e| Error::write_failed(path, e))
    }
}
