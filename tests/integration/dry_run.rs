//! Integration tests for dry-run functionality.

use pdftoolkit::config::{Config, Rotation};
use pdftoolkit::inputs::InputList;
use pdftoolkit::ops::Operations;
use pdftoolkit::selection::PageRange;
use tempfile::TempDir;

use crate::common::{temp_output_path, write_pdf};

#[tokio::test]
async fn test_dry_run_does_not_create_output() {
    let dir = TempDir::new().unwrap();
    let a = write_pdf(&dir, "a.pdf", "A", 2);
    let b = write_pdf(&dir, "b.pdf", "B", 2);
    let output = temp_output_path(&dir);

    let mut inputs = InputList::new();
    inputs
        .add_paths([a.to_str().unwrap(), b.to_str().unwrap()])
        .unwrap();

    let mut config = Config::new(inputs.paths(), output.clone());
    config.dry_run = true;

    let report = Operations::from_config(&config)
        .merge(&inputs, &output)
        .await
        .unwrap();

    assert!(report.is_dry_run());
    assert_eq!(report.page_count, 4);
    assert!(!output.exists(), "Output file should not be created in dry run");
}

#[tokio::test]
async fn test_dry_run_still_checks_range() {
    let dir = TempDir::new().unwrap();
    let source = write_pdf(&dir, "src.pdf", "S", 2);
    let output = temp_output_path(&dir);
    let ops = Operations::new().with_dry_run(true);

    let range = PageRange::parse("1-3").unwrap();
    assert!(ops.split(&source, &range, &output).await.is_err());

    let report = ops
        .rotate(&source, Rotation::Clockwise90, &output)
        .await
        .unwrap();
    assert_eq!(report.page_count, 2);
    assert!(!output.exists());
}
