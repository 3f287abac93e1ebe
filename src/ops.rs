//! Document operations: merge, split, extract, watermark and rotate.
//!
//! Each operation loads its sources, rearranges pages in memory and writes
//! the result atomically. Nothing is written unless every step before the
//! write succeeded, and a failed write leaves the destination untouched.
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolkit::inputs::InputList;
//! use pdftoolkit::ops::Operations;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut inputs = InputList::new();
//! inputs.add_paths(["a.pdf", "b.pdf"])?;
//!
//! let report = Operations::new().merge(&inputs, Path::new("out.pdf")).await?;
//! println!("Wrote {} pages", report.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::{Config, Rotation};
use crate::document::{PageExtractor, WatermarkSpec, merge_documents};
use crate::error::Result;
use crate::inputs::InputList;
use crate::io::{LoadedPdf, PdfReader, PdfWriter, WriteStatistics};
use crate::selection::{DuplicatePolicy, PageList, PageRange};
use crate::utils::format_file_size;

/// Which operation produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Concatenate several documents.
    Merge,
    /// Keep a contiguous page range.
    Split,
    /// Keep a list of pages.
    Extract,
    /// Stamp a page over every page.
    Watermark,
    /// Rotate every page.
    Rotate,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Merge => "merge",
            Self::Split => "split",
            Self::Extract => "extract",
            Self::Watermark => "watermark",
            Self::Rotate => "rotate",
        };
        f.write_str(name)
    }
}

/// Outcome of a document operation.
#[derive(Debug, Clone)]
pub struct OperationReport {
    /// The operation that ran.
    pub kind: OperationKind,

    /// Source documents, in the order they were used.
    pub sources: Vec<PathBuf>,

    /// Number of pages in the result.
    pub page_count: usize,

    /// Total size of the source files.
    pub input_size: u64,

    /// Time taken to load the sources.
    pub load_time: Duration,

    /// Total time taken.
    pub elapsed: Duration,

    /// Write statistics; `None` for a dry run.
    pub output: Option<WriteStatistics>,
}

impl OperationReport {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Whether the result was only computed, not written.
    pub fn is_dry_run(&self) -> bool {
        self.output.is_none()
    }
}

/// Runs document operations with shared reader and writer settings.
#[derive(Debug, Clone)]
pub struct Operations {
    reader: PdfReader,
    writer: PdfWriter,
    extractor: PageExtractor,
    jobs: usize,
    dry_run: bool,
    duplicates: DuplicatePolicy,
}

impl Operations {
    /// Create operations with default settings.
    pub fn new() -> Self {
        Self {
            reader: PdfReader::new(),
            writer: PdfWriter::new(),
            extractor: PageExtractor::new(),
            jobs: 1,
            dry_run: false,
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Create operations that follow a configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            writer: PdfWriter::with_compression(config.compression),
            jobs: config.effective_jobs(),
            dry_run: config.dry_run,
            duplicates: config.duplicates,
            ..Self::new()
        }
    }

    /// Skip writing; every other step still runs.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Concatenate every document in `inputs`, in list order.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InsufficientInputs`] for fewer than two documents
    /// - [`crate::Error::SourceUnreadable`] for the first input (in list
    ///   order) that cannot be loaded
    /// - [`crate::Error::DestinationWriteFailed`] if the output cannot be written
    pub async fn merge(&self, inputs: &InputList, output: &Path) -> Result<OperationReport> {
        let start = Instant::now();
        inputs.require_mergeable()?;

        let paths = inputs.paths();
        info!(documents = paths.len(), output = %output.display(), "merging");

        let load_start = Instant::now();
        let loaded = self.reader.load_all(&paths, self.jobs).await?;
        let load_time = load_start.elapsed();

        let input_size = loaded.iter().map(|l| l.file_size).sum();
        let merged = merge_documents(loaded.into_iter().map(|l| l.document))?;

        self.finish(
            OperationKind::Merge,
            paths,
            input_size,
            load_time,
            start,
            merged,
            output,
        )
        .await
    }

    /// Copy pages `range` of `source` into `output`, in ascending order.
    pub async fn split(
        &self,
        source: &Path,
        range: &PageRange,
        output: &Path,
    ) -> Result<OperationReport> {
        let start = Instant::now();
        let loaded = self.reader.load(source).await?;
        let sequence = range.resolve(loaded.page_count)?;
        debug!(range = %range, pages = sequence.len(), "resolved range");

        let (document, sources, input_size, load_time) = unpack(loaded);
        let result = self.extractor.extract_pages(document, &sequence)?;

        self.finish(
            OperationKind::Split,
            sources,
            input_size,
            load_time,
            start,
            result,
            output,
        )
        .await
    }

    /// Copy the pages in `list` of `source` into `output`, in list order.
    ///
    /// Repeated pages follow the configured [`DuplicatePolicy`].
    pub async fn extract(
        &self,
        source: &Path,
        list: &PageList,
        output: &Path,
    ) -> Result<OperationReport> {
        let start = Instant::now();
        let loaded = self.reader.load(source).await?;
        let sequence = list.resolve(loaded.page_count, self.duplicates)?;
        debug!(list = %list, pages = sequence.len(), "resolved page list");

        let (document, sources, input_size, load_time) = unpack(loaded);
        let result = self.extractor.extract_pages(document, &sequence)?;

        self.finish(
            OperationKind::Extract,
            sources,
            input_size,
            load_time,
            start,
            result,
            output,
        )
        .await
    }

    /// Draw the first page of `watermark` on top of every page of `source`.
    pub async fn watermark(
        &self,
        source: &Path,
        watermark: &Path,
        output: &Path,
    ) -> Result<OperationReport> {
        let start = Instant::now();
        let paths = [source.to_path_buf(), watermark.to_path_buf()];
        let mut loaded = self.reader.load_all(&paths, self.jobs.min(2)).await?;
        let load_time = start.elapsed();

        let input_size = loaded.iter().map(|l| l.file_size).sum();
        let (Some(stamp), Some(target)) = (loaded.pop(), loaded.pop()) else {
            return Err(crate::Error::document("Failed to load watermark inputs"));
        };

        let spec = WatermarkSpec::from_document(stamp.document)?;
        let mut document = target.document;
        spec.apply(&mut document)?;

        self.finish(
            OperationKind::Watermark,
            paths.to_vec(),
            input_size,
            load_time,
            start,
            document,
            output,
        )
        .await
    }

    /// Rotate every page of `source` by `rotation`.
    pub async fn rotate(
        &self,
        source: &Path,
        rotation: Rotation,
        output: &Path,
    ) -> Result<OperationReport> {
        let start = Instant::now();
        let loaded = self.reader.load(source).await?;

        let (mut document, sources, input_size, load_time) = unpack(loaded);
        self.extractor.rotate_all_pages(&mut document, rotation)?;

        self.finish(
            OperationKind::Rotate,
            sources,
            input_size,
            load_time,
            start,
            document,
            output,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn finish(
        &self,
        kind: OperationKind,
        sources: Vec<PathBuf>,
        input_size: u64,
        load_time: Duration,
        start: Instant,
        document: Document,
        output: &Path,
    ) -> Result<OperationReport> {
        let page_count = document.get_pages().len();

        let written = if self.dry_run {
            debug!(%kind, pages = page_count, "dry run, skipping write");
            None
        } else {
            Some(self.writer.save_with_stats(document, output).await?)
        };

        let report = OperationReport {
            kind,
            sources,
            page_count,
            input_size,
            load_time,
            elapsed: start.elapsed(),
            output: written,
        };

        info!(
            %kind,
            pages = report.page_count,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "operation finished"
        );
        Ok(report)
    }
}

impl Default for Operations {
    fn default() -> Self {
        Self::new()
    }
}

fn unpack(loaded: LoadedPdf) -> (Document, Vec<PathBuf>, u64, Duration) {
    (
        loaded.document,
        vec![loaded.path],
        loaded.file_size,
        loaded.load_time,
    )
}
