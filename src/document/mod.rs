//! Page-tree surgery on loaded documents.
//!
//! Everything here works on in-memory [`lopdf::Document`] values and never
//! touches the filesystem; the orchestrators in [`crate::ops`] do the
//! loading and saving around it.

pub mod merge;
pub mod pages;
pub(crate) mod tree;
pub mod watermark;

pub use merge::merge_documents;
pub use pages::PageExtractor;
pub use watermark::WatermarkSpec;
