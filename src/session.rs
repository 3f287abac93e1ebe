//! State owned by an interactive front end.
//!
//! A [`Session`] bundles the merge queue, the currently selected entry, the
//! colour theme and the recent-files list. Nothing here is global; a front
//! end creates one session and passes it to whatever needs it.

use std::path::PathBuf;

use tracing::warn;

use crate::error::{Error, Result};
use crate::inputs::{DocumentRef, InputList};
use crate::storage::RecentFiles;

/// Colour theme of the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Front-end state: inputs, selection, theme and recent files.
#[derive(Debug, Clone)]
pub struct Session {
    inputs: InputList,
    selected: Option<usize>,
    theme: Theme,
    recent: RecentFiles,
}

impl Session {
    /// Start a session backed by the given recent-files store.
    pub fn new(recent: RecentFiles) -> Self {
        Self {
            inputs: InputList::new(),
            selected: None,
            theme: Theme::default(),
            recent,
        }
    }

    /// The queued documents.
    pub fn inputs(&self) -> &InputList {
        &self.inputs
    }

    /// Mutable access to the queued documents.
    ///
    /// Clears the selection, since the caller may reorder entries.
    pub fn inputs_mut(&mut self) -> &mut InputList {
        self.selected = None;
        &mut self.inputs
    }

    /// Queue documents and remember them as recently opened.
    ///
    /// Returns how many were added. Fails without changing anything if any
    /// path is empty.
    pub fn add_documents<I, P>(&mut self, paths: I) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let references = paths
            .into_iter()
            .map(DocumentRef::new)
            .collect::<Result<Vec<_>>>()?;

        let added = references.len();
        let mut changed = false;
        for reference in &references {
            changed |= self.recent.record(reference.path());
        }
        self.inputs.add(references);

        if changed && let Err(e) = self.recent.save() {
            warn!(error = %e, "could not persist recent files");
        }

        Ok(added)
    }

    /// Select the entry at `index`.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.inputs.len() {
            return Err(Error::out_of_range(
                index.to_string(),
                format!("list has {} document(s)", self.inputs.len()),
            ));
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Drop the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Index of the selected entry.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSelection`] when nothing is selected.
    pub fn selected_document(&self) -> Result<&DocumentRef> {
        self.selected
            .and_then(|index| self.inputs.get(index))
            .ok_or(Error::NoSelection)
    }

    /// Remove the selected entry and clear the selection.
    pub fn remove_selected(&mut self) -> Result<DocumentRef> {
        let index = self.selected.ok_or(Error::NoSelection)?;
        let removed = self.inputs.remove(index)?;
        self.selected = None;
        Ok(removed)
    }

    /// Move the selected entry one place up; the selection follows it.
    pub fn move_selected_up(&mut self) -> Result<bool> {
        let index = self.selected.ok_or(Error::NoSelection)?;
        let moved = self.inputs.move_up(index);
        if moved {
            self.selected = Some(index - 1);
        }
        Ok(moved)
    }

    /// Move the selected entry one place down; the selection follows it.
    pub fn move_selected_down(&mut self) -> Result<bool> {
        let index = self.selected.ok_or(Error::NoSelection)?;
        let moved = self.inputs.move_down(index);
        if moved {
            self.selected = Some(index + 1);
        }
        Ok(moved)
    }

    /// Empty the queue and clear the selection.
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.selected = None;
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch between light and dark; returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Recently opened documents.
    pub fn recent(&self) -> &RecentFiles {
        &self.recent
    }

    /// Whether the merge action should be offered.
    pub fn merge_enabled(&self) -> bool {
        self.inputs.can_merge()
    }
}
