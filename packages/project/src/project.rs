//! The explicit per-project context.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::debug;

use stitch_vfs::{File, SnapshotError, Vfs, VfsError};

use crate::scaffold::starter_files;
use crate::scheduler::WorkQueue;
use crate::snapshot::ProjectSnapshot;

/// Name given to projects whose name is missing or blank.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

/// Trim a user-entered project name, falling back to the default.
pub fn normalize_project_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_PROJECT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Per-session UI state. Not part of the resolution contract; kept here so it
/// has an owner and a lifecycle instead of living in ambient globals.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub active_path: Option<String>,
    pub collapsed: BTreeSet<String>,
}

impl Session {
    pub fn toggle_folder(&mut self, folder: &str) {
        if !self.collapsed.remove(folder) {
            self.collapsed.insert(folder.to_string());
        }
    }

    pub fn is_collapsed(&self, folder: &str) -> bool {
        self.collapsed.contains(folder)
    }
}

/// One open project: identity, metadata, the file store, session state, and
/// the debounce timers that gate re-render and persistence.
///
/// Mutation methods take `now` so the caller's loop decides the clock; every
/// mutation marks the work queue, which is how "edit -> debounced render and
/// save" stays a single code path.
#[derive(Clone, Debug)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub creator: String,
    vfs: Vfs,
    session: Session,
    queue: WorkQueue,
}

impl Project {
    /// An empty project.
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        Project {
            id: id.into(),
            name: normalize_project_name(name),
            description: String::new(),
            creator: String::new(),
            vfs: Vfs::new(),
            session: Session::default(),
            queue: WorkQueue::new(),
        }
    }

    /// A fresh project holding the starter files, with the entry document
    /// open.
    pub fn scaffold(id: impl Into<String>, name: &str) -> Self {
        let mut project = Project::new(id, name);
        for file in starter_files() {
            // Starter paths are fixed and valid.
            let _ = project.vfs.insert(file);
        }
        project.open_first();
        project
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    /// Direct store access for collaborators (archive import) that manage
    /// their own scheduling.
    pub fn vfs_mut(&mut self) -> &mut Vfs {
        &mut self.vfs
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut WorkQueue {
        &mut self.queue
    }

    /// Make a stored file the active document.
    pub fn open(&mut self, path: &str) -> bool {
        if self.vfs.contains(path) {
            self.session.active_path = Some(path.to_string());
            true
        } else {
            false
        }
    }

    /// Open `index.html` if present, else the first file by sorted path
    /// (folder markers are not documents).
    pub fn open_first(&mut self) {
        if self.open("index.html") {
            return;
        }
        let first = self
            .vfs
            .iter()
            .find(|file| !file.is_marker())
            .map(|file| file.path().to_string());
        self.session.active_path = first;
    }

    /// Upsert a file and mark both timers.
    pub fn upsert_file(&mut self, file: File, now: Instant) -> Result<(), VfsError> {
        self.vfs.insert(file)?;
        self.queue.mark_dirty(now);
        Ok(())
    }

    /// Replace the text of an existing text file and mark both timers.
    pub fn update_text(
        &mut self,
        path: &str,
        data: impl Into<String>,
        now: Instant,
    ) -> Result<(), VfsError> {
        self.vfs.update_text(path, data)?;
        self.queue.mark_dirty(now);
        Ok(())
    }

    /// Rename a file. The active-document pointer follows the rename.
    pub fn rename_file(&mut self, old: &str, new: &str, now: Instant) -> Result<String, VfsError> {
        let target = self.vfs.rename(old, new)?;
        if self.session.active_path.as_deref() == Some(old) {
            self.session.active_path = Some(target.clone());
        }
        self.queue.mark_dirty(now);
        Ok(target)
    }

    /// Rename a folder. An active document inside it follows the move.
    pub fn rename_folder(
        &mut self,
        old: &str,
        new: &str,
        now: Instant,
    ) -> Result<usize, VfsError> {
        let moved = self.vfs.rename_folder(old, new)?;
        if let Some(active) = &self.session.active_path {
            if let Some(suffix) = active.strip_prefix(&format!("{old}/")) {
                self.session.active_path = Some(format!("{new}/{suffix}"));
            }
        }
        self.queue.mark_dirty(now);
        Ok(moved)
    }

    /// Remove a file; an active pointer at it is cleared.
    pub fn remove_file(&mut self, path: &str, now: Instant) -> Option<File> {
        let removed = self.vfs.remove(path);
        if removed.is_some() {
            if self.session.active_path.as_deref() == Some(path) {
                self.session.active_path = None;
            }
            self.queue.mark_dirty(now);
        }
        removed
    }

    /// Remove a folder and everything under it.
    pub fn remove_folder(&mut self, prefix: &str, now: Instant) -> usize {
        let removed = self.vfs.remove_folder(prefix);
        if removed > 0 {
            let inside = self
                .session
                .active_path
                .as_deref()
                .is_some_and(|active| active.starts_with(&format!("{prefix}/")));
            if inside {
                self.session.active_path = None;
            }
            self.queue.mark_dirty(now);
        }
        removed
    }

    /// The persistence blob for the current state, stamped with the caller's
    /// clock.
    pub fn snapshot(&self, updated_at: u64) -> ProjectSnapshot {
        ProjectSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            creator: self.creator.clone(),
            updated_at,
            files: self.vfs.snapshot(),
        }
    }

    /// Rebuild a project from its persistence blob.
    pub fn from_snapshot(snapshot: ProjectSnapshot) -> Result<Self, SnapshotError> {
        let vfs = Vfs::restore(snapshot.files)?;
        debug!(id = %snapshot.id, files = vfs.len(), "project loaded");
        let mut project = Project {
            id: snapshot.id,
            name: normalize_project_name(&snapshot.name),
            description: snapshot.description,
            creator: snapshot.creator,
            vfs,
            session: Session::default(),
            queue: WorkQueue::new(),
        };
        project.open_first();
        Ok(project)
    }
}
