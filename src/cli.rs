//! CLI argument parsing for pdftoolkit.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, early validation, and help text generation.
//! Page selections are parsed here so malformed input is rejected before any
//! file is opened.
//!
//! # Examples
//!
//! ```no_run
//! use pdftoolkit::cli::Cli;
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! println!("{:?}", cli.command);
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{CompressionLevel, Config, OverwriteMode, Rotation};
use crate::error::{Error, Result};
use crate::selection::{DuplicatePolicy, PageList, PageRange};
use crate::storage::default_store_path;

/// Merge, split, extract, watermark and rotate PDF documents.
///
/// pdftoolkit rearranges the pages of existing PDF files. Every command
/// writes its result atomically: the output either appears complete or
/// not at all.
#[derive(Parser, Debug)]
#[command(name = "pdftoolkit")]
#[command(version)]
#[command(about = "Merge, split, extract, watermark and rotate PDF documents", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Dry run - load and check everything without writing output
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Verbose output - show detailed information and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing output file
    ///
    /// If the output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Compression level for output PDF
    ///
    /// - none: No compression (preserves exact structure)
    /// - standard: Compress content streams (default)
    /// - maximum: Also drop unused objects
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Number of documents loaded in parallel
    ///
    /// Default is number of CPU cores. Use 1 for sequential loading.
    #[arg(short, long, global = true, value_name = "N")]
    pub jobs: Option<usize>,

    /// Location of the recent files list
    #[arg(long, global = true, value_name = "FILE", env = "PDFTOOLKIT_RECENT_FILE")]
    pub recent_file: Option<PathBuf>,

    /// Do not read or update the recent files list
    #[arg(long, global = true)]
    pub no_recent: bool,
}

/// Available operations.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Concatenate documents in the order given
    ///
    /// Inputs may be files, directories (searched recursively for .pdf
    /// files) or glob patterns.
    ///
    /// Examples:
    ///   pdftoolkit merge a.pdf b.pdf -o both.pdf
    ///   pdftoolkit merge 'chapters/*.pdf' -o book.pdf
    Merge {
        /// Documents to merge (at least two after expansion)
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<String>,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Copy a contiguous page range into a new document
    ///
    /// Example:
    ///   pdftoolkit split report.pdf --range 3-5 -o part.pdf
    Split {
        /// Source document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages to keep, as START-END (1-based, inclusive)
        #[arg(short, long, value_name = "START-END")]
        range: String,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Copy selected pages, in the order listed, into a new document
    ///
    /// Pages may repeat; each mention produces a page unless --dedupe
    /// is given.
    ///
    /// Example:
    ///   pdftoolkit extract report.pdf --pages 5,1,3 -o picked.pdf
    Extract {
        /// Source document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Comma-separated 1-based page numbers
        #[arg(short, long, value_name = "LIST")]
        pages: String,

        /// Keep only the first mention of a repeated page
        #[arg(long)]
        dedupe: bool,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Draw the first page of a watermark document over every page
    ///
    /// Example:
    ///   pdftoolkit watermark report.pdf --watermark draft.pdf -o stamped.pdf
    Watermark {
        /// Source document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Document whose first page is the watermark
        #[arg(short, long, value_name = "FILE")]
        watermark: PathBuf,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Rotate every page clockwise
    Rotate {
        /// Source document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Rotation in degrees
        #[arg(short, long, value_name = "DEGREES")]
        #[arg(value_parser = ["90", "180", "270"])]
        angle: String,

        /// Output PDF file path
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Show page count, size and version of documents
    Info {
        /// Documents to inspect
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<PathBuf>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// List recently opened documents
    Recent {
        /// Forget all entries
        #[arg(long)]
        clear: bool,
    },
}

impl Command {
    /// Source paths and output path of a command that writes a document.
    pub fn io_paths(&self) -> Option<(Vec<PathBuf>, PathBuf)> {
        match self {
            Self::Merge { inputs, output } => Some((
                inputs.iter().map(PathBuf::from).collect(),
                output.clone(),
            )),
            Self::Split { input, output, .. }
            | Self::Extract { input, output, .. }
            | Self::Rotate { input, output, .. } => Some((vec![input.clone()], output.clone())),
            Self::Watermark {
                input,
                watermark,
                output,
            } => Some((vec![input.clone(), watermark.clone()], output.clone())),
            Self::Info { .. } | Self::Recent { .. } => None,
        }
    }
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the command writes no document,
    /// the compression level is invalid, or configuration validation fails.
    pub fn to_config(&self) -> Result<Config> {
        let (inputs, output) = self.command.io_paths().ok_or_else(|| {
            Error::invalid_config("This command does not write a document")
        })?;

        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let duplicates = match self.command {
            Command::Extract { dedupe: true, .. } => DuplicatePolicy::Dedupe,
            _ => DuplicatePolicy::Keep,
        };

        let config = Config {
            inputs,
            output,
            overwrite_mode,
            compression,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            jobs: self.jobs,
            duplicates,
        };

        config.validate().map_err(|e| {
            Error::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O:
    /// - Numeric ranges
    /// - Page range and page list grammar
    /// - Rotation angle
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRange`] for a bad selection and
    /// [`Error::InvalidConfig`] for other bad values.
    pub fn validate(&self) -> Result<()> {
        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(Error::invalid_config("Number of jobs must be at least 1"));
        }

        match &self.command {
            Command::Split { range, .. } => {
                PageRange::parse(range)?;
            }
            Command::Extract { pages, .. } => {
                PageList::parse(pages)?;
            }
            Command::Rotate { angle, .. } => {
                self.rotation(angle)?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Parse a rotation argument.
    pub fn rotation(&self, angle: &str) -> Result<Rotation> {
        let degrees: u16 = angle
            .parse()
            .map_err(|_| Error::invalid_config(format!("Invalid rotation degrees: {angle}")))?;
        Rotation::from_degrees(degrees)
    }

    /// Where the recent files list lives, or `None` when disabled.
    pub fn recent_store(&self) -> Option<PathBuf> {
        if self.no_recent {
            return None;
        }
        Some(self.recent_file.clone().unwrap_or_else(default_store_path))
    }
}
