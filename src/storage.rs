//! Persisted list of recently opened documents.
//!
//! The store is a JSON array of paths, oldest first, holding at most
//! [`MAX_RECENT`] distinct entries. A missing file is an empty list; a file
//! that cannot be parsed is logged and treated as empty so a corrupt store
//! never blocks the tool.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::utils::temp_sibling;

/// Maximum number of entries kept.
pub const MAX_RECENT: usize = 10;

/// File name of the store inside the configuration directory.
pub const STORE_FILE_NAME: &str = "recent_files.json";

/// Default store location in the platform configuration directory.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_store_path() -> PathBuf {
    ProjectDirs::from("", "", "pdftoolkit")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORE_FILE_NAME)
}

/// Recently opened documents, backed by a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFiles {
    path: PathBuf,
    entries: Vec<PathBuf>,
}

impl RecentFiles {
    /// An empty list that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] only if the file exists but cannot be read.
    /// Unparseable contents yield an empty list.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no recent files store yet");
                return Ok(Self::new(path));
            }
            Err(e) => {
                return Err(Error::Storage {
                    path,
                    reason: e.to_string(),
                });
            }
        };

        let mut entries: Vec<PathBuf> = match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupted recent files store, starting empty");
                Vec::new()
            }
        };

        let mut seen = std::collections::HashSet::new();
        entries.retain(|entry| seen.insert(entry.clone()));
        let excess = entries.len().saturating_sub(MAX_RECENT);
        entries.drain(..excess);

        Ok(Self { path, entries })
    }

    /// Remember `file`. Already-known paths keep their position.
    ///
    /// Returns whether the list changed.
    pub fn record(&mut self, file: impl AsRef<Path>) -> bool {
        let file = file.as_ref();
        if self.entries.iter().any(|entry| entry == file) {
            return false;
        }

        self.entries.push(file.to_path_buf());
        let excess = self.entries.len().saturating_sub(MAX_RECENT);
        self.entries.drain(..excess);
        true
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the list to its file, creating the parent directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the directory or file cannot be written.
    pub fn save(&self) -> Result<()> {
        let storage_err = |e: &dyn std::fmt::Display| Error::Storage {
            path: self.path.clone(),
            reason: e.to_string(),
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| storage_err(&e))?;
        }

        let data = serde_json::to_string_pretty(&self.entries).map_err(|e| storage_err(&e))?;

        let tmp_path = temp_sibling(&self.path);
        let written = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(data.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)
        })();

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp_path)
                && cleanup.kind() != std::io::ErrorKind::NotFound
            {
                warn!(
                    path = %tmp_path.display(),
                    error = %cleanup,
                    "failed to remove temporary recent files store"
                );
            }
            return Err(storage_err(&e));
        }

        debug!(path = %self.path.display(), entries = self.entries.len(), "saved recent files");
        Ok(())
    }
}
