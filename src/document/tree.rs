//! Page tree helpers.
//!
//! Operations that rearrange pages first copy the inheritable attributes onto
//! each page, then hang every page directly under the root `Pages` node. That
//! keeps a page valid wherever it ends up, at the cost of flattening any
//! intermediate `Pages` nodes (which become unreachable and are pruned).

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// Attributes a page may inherit from its ancestors.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// US Letter, used when no `MediaBox` can be found.
pub(crate) const DEFAULT_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

/// Object id of the root `Pages` node.
pub(crate) fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    Ok(doc.catalog()?.get(b"Pages")?.as_reference()?)
}

/// Page object ids in document order.
pub(crate) fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Look up an attribute on the page or, failing that, on its ancestors.
pub(crate) fn inherited_attribute(
    doc: &Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<Object>> {
    let mut node = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value.clone()));
        }
        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => node = doc.get_dictionary(parent_id)?,
            Err(_) => return Ok(None),
        }
    }

    Err(Error::document(format!(
        "page tree deeper than {MAX_TREE_DEPTH} levels at object {} {}",
        page_id.0, page_id.1
    )))
}

/// Copy inherited attributes onto the page itself.
pub(crate) fn flatten_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let mut missing = Vec::new();
    for key in INHERITABLE {
        if doc.get_dictionary(page_id)?.has(key) {
            continue;
        }
        if let Some(value) = inherited_attribute(doc, page_id, key)? {
            missing.push((key, value));
        }
    }

    if missing.is_empty() {
        return Ok(());
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in missing {
        page.set(key, value);
    }
    Ok(())
}

/// Flatten every page in the document and return their ids in order.
pub(crate) fn flatten_all(doc: &mut Document) -> Result<Vec<ObjectId>> {
    let ids = page_ids(doc);
    for &id in &ids {
        flatten_inherited(doc, id)?;
    }
    Ok(ids)
}

/// Make `pages` the complete, ordered page list of the document.
///
/// Every page is re-parented to the root `Pages` node. The pages must already
/// carry their inherited attributes.
pub(crate) fn set_page_list(doc: &mut Document, pages: &[ObjectId]) -> Result<()> {
    let root_id = root_pages_id(doc)?;

    for &page_id in pages {
        doc.get_dictionary_mut(page_id)?
            .set("Parent", Object::Reference(root_id));
    }

    let root = doc.get_dictionary_mut(root_id)?;
    root.set(
        "Kids",
        Object::Array(pages.iter().map(|&id| Object::Reference(id)).collect()),
    );
    root.set("Count", Object::Integer(pages.len() as i64));
    for key in INHERITABLE {
        root.remove(key);
    }

    Ok(())
}

/// Resolve an object that may be an indirect reference.
pub(crate) fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

/// Owned copy of a dictionary that may be stored inline or by reference.
pub(crate) fn owned_dictionary(doc: &Document, object: Option<&Object>) -> Result<Dictionary> {
    match object {
        Some(object) => Ok(resolve(doc, object)?.as_dict()?.clone()),
        None => Ok(Dictionary::new()),
    }
}

/// The effective media box of a page as four numbers.
pub(crate) fn media_box(doc: &Document, page_id: ObjectId) -> Result<[f64; 4]> {
    let Some(object) = inherited_attribute(doc, page_id, b"MediaBox")? else {
        return Ok(DEFAULT_MEDIA_BOX);
    };

    let values: Vec<f64> = resolve(doc, &object)?
        .as_array()?
        .iter()
        .filter_map(|o| match o {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(f64::from(*r)),
            _ => None,
        })
        .collect();

    match values.as_slice() {
        [llx, lly, urx, ury] => Ok([*llx, *lly, *urx, *ury]),
        _ => Ok(DEFAULT_MEDIA_BOX),
    }
}
