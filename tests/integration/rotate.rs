//! Integration tests for page rotation.

use lopdf::Document;
use pdftoolkit::config::Rotation;
use pdftoolkit::ops::Operations;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{output_labels, temp_output_path, write_pdf};

fn rotations(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .into_values()
        .map(|id| {
            doc.get_dictionary(id)
                .unwrap()
                .get(b"Rotate")
                .and_then(|o| o.as_i64())
                .unwrap_or(0)
        })
        .collect()
}

#[rstest]
#[case(Rotation::Clockwise90, 90)]
#[case(Rotation::Rotate180, 180)]
#[case(Rotation::Clockwise270, 270)]
#[tokio::test]
async fn test_rotate_all_pages(#[case] rotation: Rotation, #[case] expected: i64) {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "R", 3);
    let output = temp_output_path(&dir);

    Operations::new()
        .rotate(&source, rotation, &output)
        .await
        .unwrap();

    let doc = Document::load(&output).unwrap();
    assert_eq!(rotations(&doc), vec![expected; 3]);
    assert_eq!(output_labels(&output), vec!["R-1", "R-2", "R-3"]);
}

#[tokio::test]
async fn test_rotations_accumulate() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "R", 2);
    let once = dir.path().join("once.pdf");
    let twice = temp_output_path(&dir);
    let ops = Operations::new();

    ops.rotate(&source, Rotation::Clockwise270, &once).await.unwrap();
    ops.rotate(&once, Rotation::Rotate180, &twice).await.unwrap();

    let doc = Document::load(&twice).unwrap();
    assert_eq!(rotations(&doc), vec![90, 90]);
}
