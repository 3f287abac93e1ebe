//! Shared helpers for pdftoolkit integration tests.
//!
//! Fixture documents are generated on the fly: page `k` of a document
//! labelled `L` draws the text `L-k`, so page order can be checked after
//! any operation.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a document with `pages` numbered pages.
pub fn numbered_document(label: &str, pages: usize) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::with_capacity(pages);
    for k in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("{label}-{k}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Save a numbered document as `dir/name`.
pub fn write_pdf(dir: &TempDir, name: &str, label: &str, pages: usize) -> PathBuf {
    let path = dir.path().join(name);
    numbered_document(label, pages)
        .save(&path)
        .expect("save fixture");
    path
}

/// Text drawn on each page, in page order.
pub fn page_labels(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .flat_map(|id| {
            let data = doc.get_page_content(id).expect("page content");
            Content::decode(&data)
                .expect("decode content")
                .operations
                .into_iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(Object::String(bytes, _)) => {
                        Some(String::from_utf8_lossy(bytes).into_owned())
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Load a written output and return its page labels.
pub fn output_labels(path: &std::path::Path) -> Vec<String> {
    let doc = Document::load(path).expect("load output");
    page_labels(&doc)
}

/// Create a temporary output path for test results.
pub fn temp_output_path(dir: &TempDir) -> PathBuf {
    dir.path().join("output.pdf")
}
