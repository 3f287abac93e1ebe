//! The ordered list of documents queued for a merge.
//!
//! Insertion order is merge order. The list exposes a single gate,
//! [`InputList::can_merge`], which front ends poll to enable or disable
//! their merge action.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::io::PdfReader;

/// Minimum number of documents a merge needs.
pub const MIN_MERGE_INPUTS: usize = 2;

/// File identity used to notice that a document changed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

impl Fingerprint {
    fn of(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        Some(Self {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Handle to a source PDF.
///
/// The page count is read on first use and re-read when the file's size or
/// modification time changes.
#[derive(Debug, Clone)]
pub struct DocumentRef {
    path: PathBuf,
    cached: Option<(Fingerprint, usize)>,
}

impl DocumentRef {
    /// Create a reference to the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyReference`] if `path` is empty.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::EmptyReference);
        }
        Ok(Self { path, cached: None })
    }

    /// Path of the referenced document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Page count, loading the document if the cache is cold or stale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnreadable`] if the document cannot be loaded.
    pub fn page_count(&mut self) -> Result<usize> {
        let current = Fingerprint::of(&self.path);

        if let (Some((seen, count)), Some(now)) = (self.cached, current)
            && seen == now
        {
            return Ok(count);
        }

        debug!(path = %self.path.display(), "resolving page count");
        let loaded = PdfReader::new().load_blocking(&self.path)?;
        let count = loaded.page_count;

        self.cached = current.map(|fingerprint| (fingerprint, count));
        Ok(count)
    }

    /// Cached page count, if one is known. Never touches the disk.
    pub fn cached_page_count(&self) -> Option<usize> {
        self.cached.map(|(_, count)| count)
    }

    /// Forget the cached page count.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl PartialEq for DocumentRef {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for DocumentRef {}

/// Ordered list of documents to merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputList {
    entries: Vec<DocumentRef>,
}

impl InputList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append references in the given order. Duplicates are allowed.
    pub fn add<I>(&mut self, references: I)
    where
        I: IntoIterator<Item = DocumentRef>,
    {
        self.entries.extend(references);
    }

    /// Append documents given as files, directories or glob patterns.
    ///
    /// Plain file paths are taken as-is. Directories are walked recursively
    /// and glob patterns expanded; from those, only files with a `.pdf`
    /// extension are kept, in file-name order.
    ///
    /// Returns the number of documents added.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty path, an invalid glob pattern, or a
    /// directory that cannot be read. Nothing is added in that case.
    pub fn add_paths<T>(&mut self, inputs: T) -> Result<usize>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let mut found = Vec::new();

        for input in inputs {
            let input = input.as_ref();
            if input.is_empty() {
                return Err(Error::EmptyReference);
            }

            if is_glob_pattern(input) {
                found.extend(expand_glob(input)?);
            } else {
                let path = PathBuf::from(input);
                if path.is_dir() {
                    found.extend(walk_directory(&path)?);
                } else {
                    found.push(path);
                }
            }
        }

        let references = found
            .into_iter()
            .map(DocumentRef::new)
            .collect::<Result<Vec<_>>>()?;
        let added = references.len();
        self.add(references);

        debug!(added, total = self.len(), "documents added to input list");
        Ok(added)
    }

    /// Remove and return the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not a valid position.
    pub fn remove(&mut self, index: usize) -> Result<DocumentRef> {
        if index >= self.entries.len() {
            return Err(Error::out_of_range(
                index.to_string(),
                format!("list has {} entries", self.entries.len()),
            ));
        }
        Ok(self.entries.remove(index))
    }

    /// Swap the entry at `index` with the one before it.
    ///
    /// Returns `false` without changing anything at the top of the list or
    /// for an index past the end.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index - 1, index);
        true
    }

    /// Swap the entry at `index` with the one after it.
    ///
    /// Returns `false` without changing anything at the bottom of the list
    /// or for an index past the end.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.entries.len().saturating_sub(1) {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry that names the same file as `path`.
    ///
    /// Paths are compared as written and, when both exist, after
    /// canonicalization. Returns the number of entries removed.
    pub fn exclude(&mut self, path: &Path) -> usize {
        let canonical = path.canonicalize().ok();
        let before = self.entries.len();

        self.entries.retain(|entry| {
            let same = entry.path == path
                || canonical
                    .as_ref()
                    .is_some_and(|c| entry.path.canonicalize().ok().as_ref() == Some(c));
            !same
        });

        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(path = %path.display(), removed, "excluded path from input list");
        }
        removed
    }

    /// Whether there are enough documents to merge.
    pub fn can_merge(&self) -> bool {
        self.entries.len() >= MIN_MERGE_INPUTS
    }

    /// Fail with [`Error::InsufficientInputs`] unless [`Self::can_merge`].
    pub fn require_mergeable(&self) -> Result<()> {
        if self.can_merge() {
            Ok(())
        } else {
            Err(Error::InsufficientInputs {
                required: MIN_MERGE_INPUTS,
                found: self.entries.len(),
            })
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&DocumentRef> {
        self.entries.get(index)
    }

    /// Mutable entry at `index`, e.g. to resolve its page count.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut DocumentRef> {
        self.entries.get_mut(index)
    }

    /// Iterate over entries in merge order.
    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRef> {
        self.entries.iter()
    }

    /// Snapshot of the paths in merge order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a InputList {
    type Item = &'a DocumentRef;
    type IntoIter = std::slice::Iter<'a, DocumentRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Expand a glob pattern into PDF paths.
fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern)
        .map_err(|err| Error::invalid_config(format!("Invalid pattern '{pattern}': {err}")))?;

    let mut resolved = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| Error::Io {
            source: err.into_error(),
        })?;
        if path.is_file() && has_pdf_extension(&path) {
            resolved.push(path);
        }
    }

    Ok(resolved)
}

/// Collect PDF files below `dir`.
fn walk_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| Error::Io {
            source: std::io::Error::other(err.to_string()),
        })?;
        if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
            resolved.push(entry.into_path());
        }
    }

    Ok(resolved)
}
