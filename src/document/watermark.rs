//! Stamping one page on top of every page of another document.
//!
//! The watermark page is turned into a Form XObject once. Each target page
//! then gets three pieces of content: a shared `q` stream, its own original
//! streams, and a stream that closes the original graphics state and draws
//! the form. The original content cannot leak a transformation or colour
//! into the watermark, and the watermark keeps its own coordinates, so it is
//! neither moved nor scaled.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::debug;

use crate::document::tree;
use crate::error::{Error, Result};

/// A watermark source: its document and the page drawn on top of others.
#[derive(Debug, Clone)]
pub struct WatermarkSpec {
    document: Document,
}

impl WatermarkSpec {
    /// Use the first page of `document` as the watermark.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Document`] if the document has no pages.
    pub fn from_document(document: Document) -> Result<Self> {
        if document.get_pages().is_empty() {
            return Err(Error::document("Watermark document has no pages"));
        }
        Ok(Self { document })
    }

    /// Stamp the watermark over every page of `target`.
    ///
    /// Returns the number of pages stamped.
    pub fn apply(self, target: &mut Document) -> Result<usize> {
        let mut source = self.document;
        source.renumber_objects_with(target.max_id + 1);

        let source_page = tree::page_ids(&source)
            .into_iter()
            .next()
            .ok_or_else(|| Error::document("Watermark document has no pages"))?;
        let form = page_to_form(&source, source_page)?;

        target.max_id = target.max_id.max(source.max_id);
        target.objects.extend(source.objects);
        let form_id = target.add_object(Object::Stream(form));

        let open_id = target.add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
        let mut draw_streams: HashMap<Vec<u8>, ObjectId> = HashMap::new();

        let pages = tree::flatten_all(target)?;
        for &page_id in &pages {
            let name = register_form(target, page_id, form_id)?;

            let draw_id = match draw_streams.get(&name) {
                Some(&id) => id,
                None => {
                    let mut ops = b"\nQ\nq\n/".to_vec();
                    ops.extend_from_slice(&name);
                    ops.extend_from_slice(b" Do\nQ\n");
                    let id = target.add_object(Stream::new(dictionary! {}, ops));
                    draw_streams.insert(name, id);
                    id
                }
            };

            wrap_contents(target, page_id, open_id, draw_id)?;
        }

        target.prune_objects();

        debug!(pages = pages.len(), "stamped watermark");
        Ok(pages.len())
    }
}

/// Build a Form XObject holding the page's content, resources and media box.
fn page_to_form(doc: &Document, page_id: ObjectId) -> Result<Stream> {
    let content = doc.get_page_content(page_id)?;
    let [llx, lly, urx, ury] = tree::media_box(doc, page_id)?;

    let mut form = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "FormType" => 1,
        "BBox" => vec![llx.into(), lly.into(), urx.into(), ury.into()],
    };
    if let Some(resources) = tree::inherited_attribute(doc, page_id, b"Resources")? {
        form.set("Resources", resources);
    }

    Ok(Stream::new(form, content))
}

/// Add the form to the page's XObject resources under an unused name.
fn register_form(doc: &mut Document, page_id: ObjectId, form_id: ObjectId) -> Result<Vec<u8>> {
    let page = doc.get_dictionary(page_id)?;
    let mut resources = tree::owned_dictionary(doc, page.get(b"Resources").ok())?;
    let mut xobjects = tree::owned_dictionary(doc, resources.get(b"XObject").ok())?;

    let name = unused_name(&xobjects);
    xobjects.set(name.clone(), Object::Reference(form_id));
    resources.set("XObject", Object::Dictionary(xobjects));

    doc.get_dictionary_mut(page_id)?
        .set("Resources", Object::Dictionary(resources));
    Ok(name)
}

fn unused_name(xobjects: &Dictionary) -> Vec<u8> {
    (0..)
        .map(|n| format!("Wm{n}").into_bytes())
        .find(|candidate| !xobjects.has(candidate))
        .unwrap_or_else(|| b"Wm".to_vec())
}

fn wrap_contents(
    doc: &mut Document,
    page_id: ObjectId,
    open_id: ObjectId,
    draw_id: ObjectId,
) -> Result<()> {
    let original = doc.get_dictionary(page_id)?.get(b"Contents").ok().cloned();

    let mut contents = vec![Object::Reference(open_id)];
    match original {
        Some(Object::Array(existing)) => contents.extend(existing),
        // A Contents array may itself be stored indirectly; only streams
        // are allowed as its elements.
        Some(Object::Reference(id)) => match doc.get_object(id)? {
            Object::Array(existing) => contents.extend(existing.iter().cloned()),
            _ => contents.push(Object::Reference(id)),
        },
        Some(_) | None => {}
    }
    contents.push(Object::Reference(draw_id));

    doc.get_dictionary_mut(page_id)?
        .set("Contents", Object::Array(contents));
    Ok(())
}
