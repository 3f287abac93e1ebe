//! Error types for pdftoolkit.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are
//! grouped so the presentation layer can render them without knowing
//! anything about `lopdf` internals:
//!
//! - **Input errors**: malformed or out-of-range page selections, too few
//!   documents, missing selection
//! - **Source errors**: a document cannot be opened or is not a usable PDF
//! - **Destination errors**: the output cannot be written
//! - **Document errors**: page-tree manipulation failed inside the library

use std::io;
use std::path::PathBuf;

/// Result type alias for pdftoolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pdftoolkit operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A range or list specification does not follow its grammar.
    #[error("Malformed page selection '{input}': {reason}")]
    MalformedRange {
        /// The text as supplied by the user.
        input: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A page number or list index lies outside the valid bounds.
    #[error("Out of range '{input}': {reason}")]
    OutOfRange {
        /// The offending value or specification.
        input: String,
        /// Which bound was violated.
        reason: String,
    },

    /// A referenced document cannot be opened or is not a valid PDF.
    #[error("Cannot read PDF: {}\n  Reason: {reason}", .path.display())]
    SourceUnreadable {
        /// Path to the document.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// A merge was attempted with too few documents.
    #[error("At least {required} documents are required to merge, found {found}")]
    InsufficientInputs {
        /// Minimum number of documents.
        required: usize,
        /// Number of documents available.
        found: usize,
    },

    /// The output file could not be written.
    #[error("Failed to write output file: {}\n  Reason: {source}", .path.display())]
    DestinationWriteFailed {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Output file already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// The operation needs a selected document and none is selected.
    #[error("No document selected")]
    NoSelection,

    /// A document reference was created from an empty path.
    #[error("Document path must not be empty")]
    EmptyReference,

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// The PDF library failed while rearranging pages.
    #[error("Document operation failed: {reason}")]
    Document {
        /// Description of what went wrong.
        reason: String,
    },

    /// The recent-files store could not be read or written.
    #[error("Recent files store error at {}: {reason}", .path.display())]
    Storage {
        /// Location of the store.
        path: PathBuf,
        /// Description of what went wrong.
        reason: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Self::document(err.to_string())
    }
}

impl Error {
    /// Create a MalformedRange error.
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRange {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an OutOfRange error.
    pub fn out_of_range(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a SourceUnreadable error.
    pub fn source_unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a DestinationWriteFailed error.
    pub fn write_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::DestinationWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a Document error.
    pub fn document(reason: impl Into<String>) -> Self {
        Self::Document {
            reason: reason.into(),
        }
    }

    /// Check if the user can fix this error by changing what they typed.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRange { .. }
                | Self::OutOfRange { .. }
                | Self::InsufficientInputs { .. }
                | Self::NoSelection
                | Self::EmptyReference
                | Self::InvalidConfig { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedRange { .. } => 1,
            Self::OutOfRange { .. } => 1,
            Self::InsufficientInputs { .. } => 1,
            Self::NoSelection => 1,
            Self::EmptyReference => 1,
            Self::InvalidConfig { .. } => 1,
            Self::SourceUnreadable { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::DestinationWriteFailed { .. } => 5,
            Self::Storage { .. } => 5,
            Self::Io { .. } => 5,
            Self::Document { .. } => 6,
            Self::Cancelled => 130, // Standard exit code for SIGINT
        }
    }
}
