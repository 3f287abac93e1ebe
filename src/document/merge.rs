//! Concatenating documents.

use lopdf::{Document, ObjectId};
use tracing::debug;

use crate::document::tree;
use crate::error::{Error, Result};

/// Combine documents into one, in order.
///
/// The first document becomes the base: its catalog, metadata and outline
/// are kept. Every later document's objects are renumbered past the base's
/// highest id and moved in, and all pages are hung under the base's root
/// `Pages` node in input order.
///
/// # Errors
///
/// Returns [`Error::InsufficientInputs`] for an empty input and
/// [`Error::Document`] if a page tree is malformed.
pub fn merge_documents<I>(documents: I) -> Result<Document>
where
    I: IntoIterator<Item = Document>,
{
    let mut documents = documents.into_iter();
    let mut merged = documents.next().ok_or(Error::InsufficientInputs {
        required: 1,
        found: 0,
    })?;

    let mut pages: Vec<ObjectId> = tree::flatten_all(&mut merged)?;
    let mut max_id = merged.max_id;
    let mut merged_count = 1;

    for mut doc in documents {
        // Renumber objects to avoid ID conflicts
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        pages.extend(tree::flatten_all(&mut doc)?);
        merged.objects.extend(doc.objects);
        merged_count += 1;
    }

    merged.max_id = max_id;
    tree::set_page_list(&mut merged, &pages)?;
    merged.prune_objects();
    merged.renumber_objects();

    debug!(
        documents = merged_count,
        pages = pages.len(),
        "merged page trees"
    );

    Ok(merged)
}
