//! Integration tests for error handling and edge cases.

use pdftoolkit::config::{Config, OverwriteMode};
use pdftoolkit::error::Error;
use pdftoolkit::inputs::{DocumentRef, InputList};
use pdftoolkit::ops::Operations;
use pdftoolkit::selection::{PageList, PageRange};
use pdftoolkit::validation::Validator;
use rstest::rstest;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::common::{temp_output_path, write_pdf};

#[rstest]
#[case("")]
#[case("5")]
#[case("1-2-3")]
#[case("a-b")]
fn test_malformed_range(#[case] input: &str) {
    assert!(matches!(
        PageRange::parse(input),
        Err(Error::MalformedRange { .. })
    ));
}

#[rstest]
#[case("")]
#[case("1,,2")]
#[case("1,x")]
#[case(",")]
fn test_malformed_list(#[case] input: &str) {
    assert!(matches!(
        PageList::parse(input),
        Err(Error::MalformedRange { .. })
    ));
}

#[tokio::test]
async fn test_error_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let output = temp_output_path(&dir);

    let missing = PathBuf::from("/nonexistent/file.pdf");
    let range = PageRange::parse("1-1").unwrap();
    let result = Operations::new().split(&missing, &range, &output).await;

    match result {
        Err(Error::SourceUnreadable { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected SourceUnreadable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_corrupted_pdf() {
    let dir = TempDir::new().unwrap();
    let good = write_pdf(&dir, "good.pdf", "G", 1);
    let corrupted = dir.path().join("corrupted.pdf");
    std::fs::write(&corrupted, b"").unwrap();
    let output = temp_output_path(&dir);

    let mut inputs = InputList::new();
    inputs.add([
        DocumentRef::new(&good).unwrap(),
        DocumentRef::new(&corrupted).unwrap(),
    ]);

    let result = Operations::new().merge(&inputs, &output).await;
    assert!(matches!(result, Err(Error::SourceUnreadable { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_error_single_merge_input() {
    let dir = TempDir::new().unwrap();
    let good = write_pdf(&dir, "good.pdf", "G", 1);
    let output = temp_output_path(&dir);

    let mut inputs = InputList::new();
    inputs.add([DocumentRef::new(&good).unwrap()]);

    let err = Operations::new().merge(&inputs, &output).await.unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientInputs {
            required: 2,
            found: 1
        }
    ));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_error_empty_reference() {
    assert!(matches!(DocumentRef::new(""), Err(Error::EmptyReference)));
}

#[test]
fn test_error_empty_input_list() {
    let config = Config::new(vec![], PathBuf::from("out.pdf"));
    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_no_clobber_existing_output() {
    let dir = TempDir::new().unwrap();
    let existing = write_pdf(&dir, "existing.pdf", "X", 1);

    let result = Validator::new()
        .validate_output(&existing, OverwriteMode::NoClobber)
        .await;
    assert!(matches!(result, Err(Error::OutputExists { .. })));
}

#[tokio::test]
async fn test_rejected_selection_keeps_existing_output() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "S", 3);
    let output = write_pdf(&dir, "out.pdf", "OLD", 1);
    let before = std::fs::read(&output).unwrap();

    let range = PageRange::parse("2-9").unwrap();
    let result = Operations::new().split(&source, &range, &output).await;

    assert!(result.is_err());
    assert_eq!(std::fs::read(&output).unwrap(), before);
}
