//! PDF input/output operations.
//!
//! This module handles reading and writing PDF files with proper error
//! handling and validation.

pub mod reader;
pub mod writer;

pub use reader::{LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
