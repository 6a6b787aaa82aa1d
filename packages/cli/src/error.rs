//! CLI error type: one enum over every layer the driver touches.

use stitch_project::StoreError;
use stitch_vfs::{SnapshotError, VfsError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("project '{id}' not found (create it with `stitch new {id}`)")]
    ProjectNotFound { id: String },

    #[error("provide file contents with --text or --file")]
    MissingContents,

    #[error(transparent)]
    Vfs(#[from] VfsError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
