//! Error types for VFS mutations and snapshot exchange.

use crate::file::FileKind;

/// A rejected VFS operation.
///
/// These are structured failures, not faults: callers decide whether to
/// surface them. Nothing in this crate panics on bad input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VfsError {
    /// The path normalizes to the empty string.
    #[error("path normalizes to empty")]
    EmptyPath,

    /// A different file already occupies the target path.
    #[error("a file already exists at '{path}'")]
    AlreadyExists { path: String },

    /// The source path is not in the store.
    #[error("no file at '{path}'")]
    NotFound { path: String },

    /// The file at the path is not editable text.
    #[error("'{path}' is a binary file")]
    NotText { path: String },

    /// Moving a folder to a destination nested inside itself.
    #[error("cannot move folder '{from}' into itself ('{to}')")]
    FolderIntoItself { from: String, to: String },

    /// A folder move would overwrite a file outside the moved set.
    #[error("destination '{path}' already exists")]
    DestinationOccupied { path: String },
}

/// A snapshot that cannot be loaded back into a [`crate::Vfs`].
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The declared kind disagrees with the data representation.
    #[error("file '{path}': kind '{kind}' does not match its data")]
    KindMismatch { path: String, kind: FileKind },

    /// The restored file set violates a store invariant.
    #[error(transparent)]
    Vfs(#[from] VfsError),
}
