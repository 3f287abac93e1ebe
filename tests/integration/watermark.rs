//! Integration tests for watermarking.

use lopdf::{Document, Object, Stream, dictionary};
use lopdf::content::Content;
use pdftoolkit::error::Error;
use pdftoolkit::ops::Operations;
use tempfile::TempDir;

use crate::common::{numbered_document, output_labels, temp_output_path, write_pdf};

fn draws_xobject(doc: &Document, page_id: lopdf::ObjectId) -> bool {
    let data = doc.get_page_content(page_id).unwrap();
    Content::decode(&data)
        .unwrap()
        .operations
        .iter()
        .any(|op| op.operator == "Do")
}

#[tokio::test]
async fn test_watermark_every_page() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "P", 4);
    let stamp = write_pdf(&dir, "stamp.pdf", "DRAFT", 1);
    let output = temp_output_path(&dir);

    let report = Operations::new()
        .watermark(&source, &stamp, &output)
        .await
        .unwrap();

    assert_eq!(report.page_count, 4);
    assert_eq!(output_labels(&output), vec!["P-1", "P-2", "P-3", "P-4"]);

    let doc = Document::load(&output).unwrap();
    for page_id in doc.get_pages().into_values() {
        assert!(draws_xobject(&doc, page_id));
    }
}

#[tokio::test]
async fn test_watermark_twice_uses_distinct_names() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "P", 2);
    let first = write_pdf(&dir, "first.pdf", "ONE", 1);
    let second = write_pdf(&dir, "second.pdf", "TWO", 1);
    let once = dir.path().join("once.pdf");
    let twice = temp_output_path(&dir);
    let ops = Operations::new();

    ops.watermark(&source, &first, &once).await.unwrap();
    ops.watermark(&once, &second, &twice).await.unwrap();

    let doc = Document::load(&twice).unwrap();
    let page_id = doc.get_pages()[&1];
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = match page.get(b"Resources").unwrap() {
        Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
        other => other.as_dict().unwrap(),
    };
    let xobjects = match resources.get(b"XObject").unwrap() {
        Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
        other => other.as_dict().unwrap(),
    };
    assert!(xobjects.has(b"Wm0"));
    assert!(xobjects.has(b"Wm1"));
}

#[tokio::test]
async fn test_watermark_unreadable_stamp() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "P", 2);
    let stamp = dir.path().join("stamp.pdf");
    std::fs::write(&stamp, b"%PDF-1.4 truncated").unwrap();
    let output = temp_output_path(&dir);

    let result = Operations::new().watermark(&source, &stamp, &output).await;

    match result {
        Err(Error::SourceUnreadable { path, .. }) => assert_eq!(path, stamp),
        other => panic!("expected SourceUnreadable, got {other:?}"),
    }
    assert!(!output.exists());
}

#[tokio::test]
async fn test_watermark_keeps_indirect_content_arrays() {
    let dir = TempDir::new().unwrap();
    let mut doc = numbered_document("P", 2);
    for (number, page_id) in doc.get_pages() {
        let original = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"Contents")
            .unwrap()
            .clone();
        let footer = format!("BT /F1 10 Tf 72 40 Td (footer-{number}) Tj ET");
        let footer_id = doc.add_object(Stream::new(dictionary! {}, footer.into_bytes()));
        let array_id = doc.add_object(Object::Array(vec![original, Object::Reference(footer_id)]));
        doc.get_dictionary_mut(page_id)
            .unwrap()
            .set("Contents", Object::Reference(array_id));
    }
    let source = dir.path().join("src.pdf");
    doc.save(&source).unwrap();
    let stamp = write_pdf(&dir, "stamp.pdf", "DRAFT", 1);
    let output = temp_output_path(&dir);

    Operations::new()
        .watermark(&source, &stamp, &output)
        .await
        .unwrap();

    assert_eq!(
        output_labels(&output),
        vec!["P-1", "footer-1", "P-2", "footer-2"]
    );
    let doc = Document::load(&output).unwrap();
    for page_id in doc.get_pages().into_values() {
        assert!(draws_xobject(&doc, page_id));
    }
}
