//! The Stitch virtual file system.
//!
//! A project is a flat, ordered mapping from normalized path to [`File`].
//! Folders are implicit - a path prefix is a folder if any file lives under
//! it - with one exception: an empty folder is represented by a reserved
//! zero-byte marker file at `<folder>/.keep`, which is excluded from export
//! and from preview resolution.
//!
//! This layer owns every mutation of the file set (create, edit, rename,
//! delete, folder moves) and the two exchange formats around it: the
//! persistence snapshot ([`FileSnapshot`]) and the archive seam
//! ([`ArchiveEntry`]).

mod archive;
mod error;
mod file;
mod snapshot;
mod tree;
mod vfs;

pub use archive::ArchiveEntry;
pub use error::{SnapshotError, VfsError};
pub use file::{is_marker_path, marker_path, File, FileBody, FileKind, FOLDER_MARKER};
pub use snapshot::{FileSnapshot, SnapshotData};
pub use tree::{build_tree, TreeNode};
pub use vfs::Vfs;

// Re-export the byte buffer type used for binary file bodies.
pub use bytes::Bytes;
