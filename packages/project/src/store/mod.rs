//! The persistence collaborator seam.
//!
//! The core hands a [`ProjectSnapshot`] to a [`ProjectStore`] and asks for
//! one back by id; how the blob is keyed and where it lives is the store's
//! business. [`MemoryStore`] backs tests, [`JsonDirStore`] keeps one JSON
//! document per project under a root directory.

mod local_disk;
mod memory;

pub use local_disk::JsonDirStore;
pub use memory::MemoryStore;

use crate::snapshot::ProjectSnapshot;

/// Errors from a persistence store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An id that cannot key a blob in this store.
    #[error("invalid project id '{id}'")]
    InvalidId { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keyed storage for project snapshots.
pub trait ProjectStore {
    /// Fetch a snapshot by id; `Ok(None)` if the store has no such project.
    fn load(&self, id: &str) -> Result<Option<ProjectSnapshot>, StoreError>;

    /// Store a snapshot under its own id, replacing any previous version.
    fn save(&mut self, snapshot: &ProjectSnapshot) -> Result<(), StoreError>;

    /// Forget a project. Deleting an absent id is not an error.
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;

    /// Every stored snapshot, most recently updated first.
    fn list(&self) -> Result<Vec<ProjectSnapshot>, StoreError>;
}
