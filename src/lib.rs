//! pdftoolkit - Merge, split, extract, watermark and rotate PDF documents.
//!
//! This library rearranges the pages of existing PDF files. It supports:
//!
//! - Merging documents in a user-chosen order
//! - Splitting out a contiguous page range
//! - Extracting an arbitrary list of pages, repeats included
//! - Stamping the first page of one document over every page of another
//! - Rotating every page
//! - An ordered working list of inputs with a persisted recent files list
//!
//! Every operation writes its result atomically: the destination either
//! receives the complete document or is left untouched.
//!
//! # Examples
//!
//! ## Merge
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
//! let report = Operations::new().merge(&inputs, Path::new("merged.pdf")).await?;
//! println!("Created {} page document", report.page_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Page selection
//!
//! ```
//! use pdftoolkit::selection::{DuplicatePolicy, PageList, PageRange};
//!
//! let range = PageRange::parse("3-5").unwrap();
//! assert_eq!(range.resolve(10).unwrap().indices(), &[2, 3, 4]);
//!
//! let list = PageList::parse("5,1,5").unwrap();
//! let pages = list.resolve(5, DuplicatePolicy::Keep).unwrap();
//! assert_eq!(pages.indices(), &[4, 0, 4]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod inputs;
pub mod io;
pub mod ops;
pub mod output;
pub mod selection;
pub mod session;
pub mod storage;
pub(crate) mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
