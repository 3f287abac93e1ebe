//! Configuration module for pdftoolkit.
//!
//! This module transforms CLI arguments into a validated, normalized
//! configuration that drives every document operation. It handles:
//! - Validation of argument combinations
//! - Application of defaults
//! - Output policy (overwrite mode, compression)

use anyhow::{Result, bail};

use crate::error::Error;
use crate::selection::DuplicatePolicy;
use std::{path::PathBuf, str::FromStr};

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact structure.
    None,
    /// Compress content streams.
    #[default]
    Standard,
    /// Compress streams and drop unreachable objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = Error;

    /// Parse compression level from string: "none", "standard", or "maximum".
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(Error::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Page rotation in degrees clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl Rotation {
    /// Parse rotation from degrees.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the value is not 90, 180, or 270.
    pub fn from_degrees(degrees: u16) -> crate::Result<Self> {
        match degrees {
            90 => Ok(Self::Clockwise90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Clockwise270),
            _ => Err(Error::invalid_config(format!(
                "Invalid rotation: {degrees}. Must be 90, 180, or 270"
            ))),
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> u16 {
        match self {
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }

    /// Add this rotation to an existing `/Rotate` value, normalized to 0..360.
    pub fn apply_to(&self, current: i64) -> i64 {
        (current.rem_euclid(360) + i64::from(self.as_degrees())).rem_euclid(360)
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Settings shared by every document operation.
///
/// Built from the command line by `Cli::to_config` and checked with
/// [`Config::validate`] before any document is touched.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source documents, in the order the operation consumes them.
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Dry run mode - validate without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Number of documents loaded concurrently (None = auto-detect).
    pub jobs: Option<usize>,

    /// What to do with repeated pages in a discrete list.
    pub duplicates: DuplicatePolicy,
}

impl Config {
    /// Create a configuration with default settings.
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Self {
        Self {
            inputs,
            output,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            dry_run: false,
            verbose: false,
            quiet: false,
            jobs: None,
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        if self.output.as_os_str().is_empty() {
            bail!("Output path must not be empty");
        }

        for input in &self.inputs {
            if input == &self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Get the effective number of parallel loads.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
