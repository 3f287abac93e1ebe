//! Integration tests for the working session and recent files store.

use pdftoolkit::ops::Operations;
use pdftoolkit::session::Session;
use pdftoolkit::storage::{MAX_RECENT, RecentFiles};
use tempfile::TempDir;

use crate::common::{output_labels, temp_output_path, write_pdf};

#[tokio::test]
async fn test_session_merge_after_reorder() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("recent.json");
    let a = write_pdf(&dir, "a.pdf", "A", 1);
    let b = write_pdf(&dir, "b.pdf", "B", 2);
    let output = temp_output_path(&dir);

    let mut session = Session::new(RecentFiles::new(&store));
    assert!(!session.merge_enabled());

    session.add_documents([a.clone(), b.clone()]).unwrap();
    assert!(session.merge_enabled());

    session.select(1).unwrap();
    assert!(session.move_selected_up().unwrap());
    assert_eq!(session.selected(), Some(0));

    Operations::new()
        .merge(session.inputs(), &output)
        .await
        .unwrap();
    assert_eq!(output_labels(&output), vec!["B-1", "B-2", "A-1"]);

    let reloaded = RecentFiles::load(&store).unwrap();
    assert_eq!(reloaded.entries(), &[a, b]);
}

#[test]
fn test_recent_files_bounded() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("recent.json");

    let mut recent = RecentFiles::new(&store);
    for i in 0..(MAX_RECENT + 3) {
        recent.record(dir.path().join(format!("{i}.pdf")));
    }
    recent.save().unwrap();

    let reloaded = RecentFiles::load(&store).unwrap();
    assert_eq!(reloaded.len(), MAX_RECENT);
    assert_eq!(
        reloaded.entries().last(),
        Some(&dir.path().join(format!("{}.pdf", MAX_RECENT + 2)))
    );
}

#[test]
fn test_corrupt_store_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("recent.json");
    std::fs::write(&store, "{ not json").unwrap();

    let recent = RecentFiles::load(&store).unwrap();
    assert!(recent.is_empty());
}
