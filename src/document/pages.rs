//! Page selection and rotation.
//!
//! This module handles page-level operations including:
//! - Building a document from a resolved page sequence (split, extract)
//! - Page rotation

use std::collections::HashSet;

use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::config::Rotation;
use crate::document::tree;
use crate::error::{Error, Result};
use crate::selection::PageSequence;

/// Catalog entries that index pages and are dropped when pages are removed.
const PAGE_INDEXED_CATALOG_KEYS: [&[u8]; 2] = [b"Outlines", b"PageLabels"];

/// Page extractor for manipulating pages in PDFs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl PageExtractor {
    /// Create a new page extractor.
    pub fn new() -> Self {
        Self
    }

    /// Keep exactly the pages in `sequence`, in that order.
    ///
    /// Indices are zero-based and must already be validated against the
    /// document's page count. A page listed more than once is copied: the
    /// copy is a new page object sharing the original's content streams and
    /// resources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if an index has no page and
    /// [`Error::Document`] if the page tree cannot be rewritten.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdftoolkit::document::PageExtractor;
    /// # use pdftoolkit::selection::resolve_list;
    /// # use lopdf::Document;
    /// # fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let count = doc.get_pages().len();
    /// let sequence = resolve_list("3,1", count)?;
    /// let extracted = PageExtractor::new().extract_pages(doc, &sequence)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract_pages(&self, mut doc: Document, sequence: &PageSequence) -> Result<Document> {
        if sequence.is_empty() {
            return Err(Error::document("No pages selected"));
        }

        let all_pages = tree::page_ids(&doc);
        let mut used: HashSet<ObjectId> = HashSet::new();
        let mut selected = Vec::with_capacity(sequence.len());

        for &index in sequence {
            let page_id = *all_pages.get(index).ok_or_else(|| {
                Error::out_of_range(
                    (index + 1).to_string(),
                    format!(
                        "page {} does not exist (document has {} page(s))",
                        index + 1,
                        all_pages.len()
                    ),
                )
            })?;

            if used.insert(page_id) {
                tree::flatten_inherited(&mut doc, page_id)?;
                selected.push(page_id);
            } else {
                let copy = doc.get_dictionary(page_id)?.clone();
                let copy_id = doc.add_object(Object::Dictionary(copy));
                selected.push(copy_id);
            }
        }

        tree::set_page_list(&mut doc, &selected)?;

        let catalog = doc.catalog_mut()?;
        for key in PAGE_INDEXED_CATALOG_KEYS {
            catalog.remove(key);
        }

        let pruned = doc.prune_objects();
        debug!(
            pages = selected.len(),
            pruned = pruned.len(),
            "rebuilt page tree"
        );

        Ok(doc)
    }

    /// Rotate all pages in a document.
    ///
    /// The rotation is added to each page's effective `/Rotate` (inherited
    /// values included) and the result is normalized to 0, 90, 180 or 270.
    ///
    /// # Errors
    ///
    /// Returns an error if a page object cannot be updated.
    pub fn rotate_all_pages(&self, doc: &mut Document, rotation: Rotation) -> Result<usize> {
        let page_ids = tree::flatten_all(doc)?;

        for &page_id in &page_ids {
            self.rotate_page(doc, page_id, rotation)?;
        }

        Ok(page_ids.len())
    }

    fn rotate_page(&self, doc: &mut Document, page_id: ObjectId, rotation: Rotation) -> Result<()> {
        let page = doc.get_dictionary_mut(page_id)?;
        let current = page.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0);
        page.set("Rotate", Object::Integer(rotation.apply_to(current)));
        Ok(())
    }
}
