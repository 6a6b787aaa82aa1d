//! Disk-backed project store: one JSON document per project id.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::snapshot::ProjectSnapshot;
use crate::store::{ProjectStore, StoreError};

/// Stores each project as `<root>/<id>.json`.
///
/// Ids become file names, so they must be plain: non-empty, no separators,
/// no leading dot.
#[derive(Debug)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open (creating if needed) a store rooted at a directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(JsonDirStore { root })
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn blob_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(StoreError::InvalidId { id: id.to_string() });
        }
        Ok(self.root.join(format!("{id}.json")))
    }
}

impl ProjectStore for JsonDirStore {
    fn load(&self, id: &str) -> Result<Option<ProjectSnapshot>, StoreError> {
        let path = self.blob_path(id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&mut self, snapshot: &ProjectSnapshot) -> Result<(), StoreError> {
        let path = self.blob_path(&snapshot.id)?;
        let raw = serde_json::to_vec(snapshot)?;
        fs::write(&path, raw)?;
        debug!(id = %snapshot.id, path = %path.display(), "project saved");
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let path = self.blob_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    fn list(&self) -> Result<Vec<ProjectSnapshot>, StoreError> {
        let mut all = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let raw = fs::read_to_string(&path)?;
            match serde_json::from_str(&raw) {
                Ok(snapshot) => all.push(snapshot),
                Err(error) => {
                    // A foreign or corrupt file should not sink the listing.
                    debug!(path = %path.display(), %error, "skipping unreadable project blob");
                }
            }
        }
        all.sort_by(|a: &ProjectSnapshot, b: &ProjectSnapshot| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitch_vfs::{File, Vfs};

    fn snapshot(id: &str, updated_at: u64) -> ProjectSnapshot {
        let mut vfs = Vfs::new();
        vfs.insert(File::text("index.html", "<p>hi</p>")).unwrap();
        vfs.insert(File::binary("img/x.png", vec![1u8, 2, 3])).unwrap();
        ProjectSnapshot {
            id: id.to_string(),
            name: "Test".to_string(),
            description: String::new(),
            creator: String::new(),
            updated_at,
            files: vfs.snapshot(),
        }
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path()).unwrap();
        store.save(&snapshot("p1", 7)).unwrap();

        let loaded = store.load("p1").unwrap().unwrap();
        assert_eq!(loaded, snapshot("p1", 7));
        assert!(store.load("absent").unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path()).unwrap();
        store.save(&snapshot("p1", 1)).unwrap();
        store.delete("p1").unwrap();
        store.delete("p1").unwrap();
        assert!(store.load("p1").unwrap().is_none());
    }

    #[test]
    fn list_skips_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path()).unwrap();
        store.save(&snapshot("a", 5)).unwrap();
        store.save(&snapshot("b", 9)).unwrap();
        fs::write(dir.path().join("junk.json"), "not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let ids: Vec<String> = store.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn hostile_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::new(dir.path()).unwrap();
        for id in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                store.load(id),
                Err(StoreError::InvalidId { .. })
            ), "{id}");
        }
    }
}
