//! The project layer: one open project and its plumbing.
//!
//! Session state that used to be ambient - the active document, collapsed
//! folders, the two debounce timers - lives in an explicit [`Project`]
//! context whose lifecycle is one open project. Persistence goes through the
//! [`ProjectStore`] seam; the core never learns how snapshots are keyed or
//! where they land.

mod project;
mod scaffold;
mod scheduler;
mod snapshot;
pub mod store;

pub use project::{normalize_project_name, Project, Session, DEFAULT_PROJECT_NAME};
pub use scaffold::starter_files;
pub use scheduler::{Debounce, DueWork, WorkQueue, PERSIST_DEBOUNCE, RENDER_DEBOUNCE};
pub use snapshot::ProjectSnapshot;
pub use store::{JsonDirStore, MemoryStore, ProjectStore, StoreError};
