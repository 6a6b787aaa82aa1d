//! The archive collaborator seam.
//!
//! Packing and unpacking live outside the core. On import the collaborator
//! hands over flat entries already stripped of a common root prefix and of
//! hidden (dot-segment) paths; the store's only job is to insert each one.
//! On export the collaborator receives the file list minus folder markers.

use tracing::debug;

use crate::error::VfsError;
use crate::file::{File, FileBody};
use crate::vfs::Vfs;

/// One entry handed over by the archive collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub body: FileBody,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, body: FileBody) -> Self {
        ArchiveEntry {
            path: path.into(),
            body,
        }
    }
}

impl Vfs {
    /// Replace the current file set with imported archive entries.
    ///
    /// Returns the number of files imported.
    pub fn import_archive(
        &mut self,
        entries: impl IntoIterator<Item = ArchiveEntry>,
    ) -> Result<usize, VfsError> {
        self.clear();
        let mut count = 0;
        for entry in entries {
            self.insert(File::new(entry.path, entry.body))?;
            count += 1;
        }
        debug!(files = count, "archive import");
        Ok(count)
    }

    /// The files an export should pack: everything except folder markers.
    pub fn export_archive(&self) -> Vec<&File> {
        self.iter().filter(|file| !file.is_marker()).collect()
    }
}
