//! Integration tests for range splitting and page extraction.

use pdftoolkit::config::Config;
use pdftoolkit::error::Error;
use pdftoolkit::ops::Operations;
use pdftoolkit::selection::{DuplicatePolicy, PageList, PageRange};
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{output_labels, temp_output_path, write_pdf};

#[rstest]
#[case("1-1", vec!["S-1"])]
#[case("3-5", vec!["S-3", "S-4", "S-5"])]
#[case("8-10", vec!["S-8", "S-9", "S-10"])]
#[tokio::test]
async fn test_split_ranges(#[case] range: &str, #[case] expected: Vec<&str>) {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "S", 10);
    let output = temp_output_path(&dir);

    let range = PageRange::parse(range).unwrap();
    let report = Operations::new()
        .split(&source, &range, &output)
        .await
        .unwrap();

    assert_eq!(report.page_count, expected.len());
    assert_eq!(output_labels(&output), expected);
}

#[tokio::test]
async fn test_split_range_past_end() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "S", 3);
    let output = temp_output_path(&dir);

    let range = PageRange::parse("2-4").unwrap();
    let result = Operations::new().split(&source, &range, &output).await;

    assert!(matches!(result, Err(Error::OutOfRange { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_extract_list_order() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "E", 6);
    let output = temp_output_path(&dir);

    let list = PageList::parse("6, 2 ,4").unwrap();
    Operations::new()
        .extract(&source, &list, &output)
        .await
        .unwrap();

    assert_eq!(output_labels(&output), vec!["E-6", "E-2", "E-4"]);
}

#[rstest]
#[case(DuplicatePolicy::Keep, vec!["E-2", "E-1", "E-2"])]
#[case(DuplicatePolicy::Dedupe, vec!["E-2", "E-1"])]
#[tokio::test]
async fn test_extract_duplicate_policy(
    #[case] policy: DuplicatePolicy,
    #[case] expected: Vec<&str>,
) {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "E", 3);
    let output = temp_output_path(&dir);

    let mut config = Config::new(vec![source.clone()], output.clone());
    config.duplicates = policy;

    let list = PageList::parse("2,1,2").unwrap();
    Operations::from_config(&config)
        .extract(&source, &list, &output)
        .await
        .unwrap();

    assert_eq!(output_labels(&output), expected);
}

#[tokio::test]
async fn test_extract_then_split_roundtrip() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "R", 8);
    let picked = dir.path().join("picked.pdf");
    let output = temp_output_path(&dir);
    let ops = Operations::new();

    let list = PageList::parse("7,3,5,1").unwrap();
    ops.extract(&source, &list, &picked).await.unwrap();

    let range = PageRange::parse("2-3").unwrap();
    ops.split(&picked, &range, &output).await.unwrap();

    assert_eq!(output_labels(&output), vec!["R-3", "R-5"]);
}

#[tokio::test]
async fn test_extract_zero_page_rejected() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "Z", 3);
    let output = temp_output_path(&dir);

    let list = PageList::parse("1,0").unwrap();
    let result = Operations::new().extract(&source, &list, &output).await;

    assert!(matches!(result, Err(Error::OutOfRange { .. })));
    assert!(!output.exists());
}
