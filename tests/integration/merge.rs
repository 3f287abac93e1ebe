//! Integration tests for merging.

use pdftoolkit::inputs::InputList;
use pdftoolkit::ops::{OperationKind, Operations};
use pdftoolkit::validation::Validator;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{output_labels, temp_output_path, write_pdf};

#[tokio::test]
async fn test_merge_two_documents_in_order() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 2);
    let b = write_pdf(&dir, "b.pdf", "B", 3);
    let output = temp_output_path(&dir);

    let mut inputs = InputList::new();
    inputs
        .add_paths([a.to_str().unwrap(), b.to_str().unwrap()])
        .unwrap();

    let report = Operations::new().merge(&inputs, &output).await.unwrap();

    assert_eq!(report.kind, OperationKind::Merge);
    assert_eq!(report.page_count, 5);
    assert_eq!(output_labels(&output), vec!["A-1", "A-2", "B-1", "B-2", "B-3"]);
}

#[tokio::test]
async fn test_merge_reordered_list() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 1);
    let b = write_pdf(&dir, "b.pdf", "B", 1);
    let c = write_pdf(&dir, "c.pdf", "C", 1);
    let output = temp_output_path(&dir);

    let mut inputs = InputList::new();
    inputs
        .add_paths([a, b, c].iter().map(|p| p.to_string_lossy().into_owned()))
        .unwrap();
    assert!(inputs.move_up(2));
    assert!(inputs.move_up(1));

    Operations::new().merge(&inputs, &output).await.unwrap();
    assert_eq!(output_labels(&output), vec!["C-1", "A-1", "B-1"]);
}

#[tokio::test]
async fn test_merge_directory_input() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir, "02.pdf", "Second", 1);
    write_pdf(&dir, "01.pdf", "First", 2);
    std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

    let out_dir = TempDir::new().unwrap();
    let output = temp_output_path(&out_dir);

    let mut inputs = InputList::new();
    let added = inputs.add_paths([dir.path().to_str().unwrap()]).unwrap();
    assert_eq!(added, 2);

    Operations::new().merge(&inputs, &output).await.unwrap();
    assert_eq!(output_labels(&output), vec!["First-1", "First-2", "Second-1"]);
}

#[tokio::test]
async fn test_merge_directory_skips_previous_output() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir, "a.pdf", "A", 1);
    write_pdf(&dir, "b.pdf", "B", 1);
    let output = write_pdf(&dir, "out.pdf", "OLD", 1);

    let mut inputs = InputList::new();
    inputs.add_paths([dir.path().to_str().unwrap()]).unwrap();
    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs.exclude(&output), 1);

    Operations::new().merge(&inputs, &output).await.unwrap();
    assert_eq!(output_labels(&output), vec!["A-1", "B-1"]);
}

#[rstest]
#[case(1)]
#[case(4)]
#[tokio::test]
async fn test_merge_order_independent_of_workers(#[case] jobs: usize) {
    let dir = TempDir::new().unwrap();
    let paths: Vec<String> = (0..5)
        .map(|i| {
            write_pdf(&dir, &format!("{i}.pdf"), &format!("D{i}"), 1)
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    let output = temp_output_path(&dir);

    let mut inputs = InputList::new();
    inputs.add_paths(&paths).unwrap();

    let mut config = pdftoolkit::Config::new(inputs.paths(), output.clone());
    config.jobs = Some(jobs);

    Operations::from_config(&config)
        .merge(&inputs, &output)
        .await
        .unwrap();
    assert_eq!(output_labels(&output), vec!["D0-1", "D1-1", "D2-1", "D3-1", "D4-1"]);
}

#[tokio::test]
async fn test_merged_output_validates() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 3);
    let output = temp_output_path(&dir);

    let mut inputs = InputList::new();
    let path = a.to_string_lossy().into_owned();
    inputs.add_paths([path.as_str(), path.as_str()]).unwrap();

    Operations::new().merge(&inputs, &output).await.unwrap();

    let info = Validator::new().validate_file(&output).await.unwrap();
    assert_eq!(info.page_count, 6);
    assert_eq!(info.page_dimensions, Some((595.0, 842.0)));
}
