//! The path-keyed store and its mutation operations.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::VfsError;
use crate::file::{File, FileBody};
use stitch_paths::normalize;

/// An ordered mapping from normalized path to [`File`] for one project.
///
/// Iteration order is always sorted by path (byte-wise), which the rest of
/// the system leans on: entry selection for the preview takes "the first
/// markup file by sorted path", and the display tree sorts within each
/// folder.
///
/// # Examples
///
/// ```rust
/// use stitch_vfs::{File, Vfs};
///
/// let mut vfs = Vfs::new();
/// vfs.insert(File::text("index.html", "<h1>hi</h1>")).unwrap();
/// assert!(vfs.contains("index.html"));
/// assert_eq!(vfs.get("index.html").unwrap().mime(), "text/html");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Vfs {
    files: BTreeMap<String, File>,
}

impl Vfs {
    pub fn new() -> Self {
        Vfs {
            files: BTreeMap::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<&File> {
        self.files.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut File> {
        self.files.get_mut(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// All files, sorted by path.
    pub fn iter(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    /// All paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Upsert a file by its (already normalized) path.
    ///
    /// The only rejected input is a path that normalized to the empty string.
    pub fn insert(&mut self, file: File) -> Result<(), VfsError> {
        if file.path().is_empty() {
            return Err(VfsError::EmptyPath);
        }
        debug!(path = file.path(), kind = %file.kind(), "vfs insert");
        self.files.insert(file.path().to_string(), file);
        Ok(())
    }

    /// Replace the text contents of an existing text file.
    pub fn update_text(&mut self, path: &str, data: impl Into<String>) -> Result<(), VfsError> {
        let file = self.files.get_mut(path).ok_or_else(|| VfsError::NotFound {
            path: path.to_string(),
        })?;
        if !file.set_text(data) {
            return Err(VfsError::NotText {
                path: path.to_string(),
            });
        }
        Ok(())
    }

    /// Move a file, preserving its contents and recomputing its MIME type.
    ///
    /// Renaming a path onto itself is a benign no-op. Returns the normalized
    /// destination path so callers can keep pointers (the active document)
    /// in step.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<String, VfsError> {
        let target = normalize(new);
        if target.is_empty() {
            return Err(VfsError::EmptyPath);
        }
        if target == old {
            return Ok(target);
        }
        if self.files.contains_key(&target) {
            return Err(VfsError::AlreadyExists { path: target });
        }
        let mut file = self
            .files
            .remove(old)
            .ok_or_else(|| VfsError::NotFound {
                path: old.to_string(),
            })?;
        file.relocate(target.clone());
        debug!(from = old, to = %target, "vfs rename");
        self.files.insert(target.clone(), file);
        Ok(target)
    }

    /// Relocate every file under a folder prefix, preserving relative
    /// suffixes. Returns the number of files moved.
    ///
    /// Renaming a folder onto itself is a benign no-op (`Ok(0)`). Moving a
    /// folder into itself, an empty target, or a destination collision with a
    /// file outside the moved set are structured failures that leave the
    /// store untouched.
    pub fn rename_folder(&mut self, old: &str, new: &str) -> Result<usize, VfsError> {
        let from = normalize(old);
        let to = normalize(new);
        if from.is_empty() || to.is_empty() {
            return Err(VfsError::EmptyPath);
        }
        if to == from {
            return Ok(0);
        }
        if to.starts_with(&format!("{from}/")) {
            return Err(VfsError::FolderIntoItself { from, to });
        }

        let prefix = format!("{from}/");
        let moving: BTreeSet<String> = self
            .files
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .cloned()
            .collect();

        for path in &moving {
            let destination = format!("{to}/{}", &path[prefix.len()..]);
            if self.files.contains_key(&destination) && !moving.contains(&destination) {
                return Err(VfsError::DestinationOccupied { path: destination });
            }
        }

        for path in &moving {
            let destination = format!("{to}/{}", &path[prefix.len()..]);
            if let Some(mut file) = self.files.remove(path) {
                file.relocate(destination.clone());
                self.files.insert(destination, file);
            }
        }
        debug!(from = %from, to = %to, moved = moving.len(), "vfs rename folder");
        Ok(moving.len())
    }

    /// Remove a single file, returning it if present.
    pub fn remove(&mut self, path: &str) -> Option<File> {
        let removed = self.files.remove(path);
        if removed.is_some() {
            debug!(path, "vfs remove");
        }
        removed
    }

    /// Remove a folder: its marker and every file under `prefix + "/"`.
    ///
    /// Prefix matching includes the separator boundary, so removing `assets`
    /// leaves `assets-backup/...` alone. Returns the number of files removed.
    pub fn remove_folder(&mut self, prefix: &str) -> usize {
        let folder = normalize(prefix);
        if folder.is_empty() {
            return 0;
        }
        let prefix = format!("{folder}/");
        let doomed: Vec<String> = self
            .files
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .cloned()
            .collect();
        for path in &doomed {
            self.files.remove(path);
        }
        debug!(folder = %folder, removed = doomed.len(), "vfs remove folder");
        doomed.len()
    }

    /// Create an empty folder by inserting its marker file.
    pub fn create_folder(&mut self, folder: &str) -> Result<String, VfsError> {
        let folder = normalize(folder);
        if folder.is_empty() {
            return Err(VfsError::EmptyPath);
        }
        self.insert(File::marker(&folder))?;
        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileKind;

    fn sample() -> Vfs {
        let mut vfs = Vfs::new();
        vfs.insert(File::text("index.html", "<h1></h1>")).unwrap();
        vfs.insert(File::text("css/a.css", "body {}")).unwrap();
        vfs.insert(File::binary("img/x.png", vec![1u8, 2, 3])).unwrap();
        vfs
    }

    #[test]
    fn insert_rejects_empty_path() {
        let mut vfs = Vfs::new();
        assert_eq!(
            vfs.insert(File::text("..", "x")),
            Err(VfsError::EmptyPath)
        );
    }

    #[test]
    fn insert_upserts_by_path() {
        let mut vfs = sample();
        vfs.insert(File::text("css/a.css", "p {}")).unwrap();
        assert_eq!(vfs.len(), 3);
        assert_eq!(
            vfs.get("css/a.css").unwrap().body().as_text(),
            Some("p {}")
        );
    }

    #[test]
    fn update_text_edits_in_place() {
        let mut vfs = sample();
        vfs.update_text("index.html", "<h2></h2>").unwrap();
        assert_eq!(
            vfs.get("index.html").unwrap().body().as_text(),
            Some("<h2></h2>")
        );
        assert_eq!(
            vfs.update_text("img/x.png", "nope"),
            Err(VfsError::NotText {
                path: "img/x.png".to_string()
            })
        );
        assert!(matches!(
            vfs.update_text("missing.txt", ""),
            Err(VfsError::NotFound { .. })
        ));
    }

    #[test]
    fn rename_moves_file_and_recomputes_mime() {
        let mut vfs = sample();
        let target = vfs.rename("css/a.css", "css/a.txt").unwrap();
        assert_eq!(target, "css/a.txt");
        assert!(!vfs.contains("css/a.css"));
        let file = vfs.get("css/a.txt").unwrap();
        assert_eq!(file.mime(), "text/plain");
        assert_eq!(file.kind(), FileKind::Text);
    }

    #[test]
    fn rename_onto_itself_is_benign() {
        let mut vfs = sample();
        assert_eq!(vfs.rename("css/a.css", "css/a.css").unwrap(), "css/a.css");
        assert_eq!(vfs.len(), 3);
    }

    #[test]
    fn rename_rejects_occupied_and_empty_targets() {
        let mut vfs = sample();
        assert_eq!(
            vfs.rename("css/a.css", "index.html"),
            Err(VfsError::AlreadyExists {
                path: "index.html".to_string()
            })
        );
        assert_eq!(vfs.rename("css/a.css", "../.."), Err(VfsError::EmptyPath));
    }

    #[test]
    fn rename_folder_preserves_suffixes() {
        let mut vfs = sample();
        vfs.insert(File::text("css/sub/deep.css", "")).unwrap();
        let moved = vfs.rename_folder("css", "styles").unwrap();
        assert_eq!(moved, 2);
        assert!(vfs.contains("styles/a.css"));
        assert!(vfs.contains("styles/sub/deep.css"));
        assert!(!vfs.contains("css/a.css"));
    }

    #[test]
    fn rename_folder_inverse_restores_paths() {
        let mut vfs = sample();
        vfs.insert(File::marker("css/empty")).unwrap();
        let before: Vec<String> = vfs.paths().map(str::to_string).collect();
        vfs.rename_folder("css", "styles").unwrap();
        vfs.rename_folder("styles", "css").unwrap();
        let after: Vec<String> = vfs.paths().map(str::to_string).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rename_folder_onto_itself_is_benign() {
        let mut vfs = sample();
        assert_eq!(vfs.rename_folder("css", "css").unwrap(), 0);
    }

    #[test]
    fn rename_folder_rejects_nesting_into_itself() {
        let mut vfs = sample();
        assert_eq!(
            vfs.rename_folder("css", "css/inner"),
            Err(VfsError::FolderIntoItself {
                from: "css".to_string(),
                to: "css/inner".to_string()
            })
        );
    }

    #[test]
    fn rename_folder_detects_collisions_outside_moved_set() {
        let mut vfs = sample();
        vfs.insert(File::text("styles/a.css", "occupied")).unwrap();
        assert_eq!(
            vfs.rename_folder("css", "styles"),
            Err(VfsError::DestinationOccupied {
                path: "styles/a.css".to_string()
            })
        );
        // The failed move left everything in place.
        assert!(vfs.contains("css/a.css"));
        assert_eq!(
            vfs.get("styles/a.css").unwrap().body().as_text(),
            Some("occupied")
        );
    }

    #[test]
    fn remove_folder_respects_separator_boundary() {
        let mut vfs = Vfs::new();
        vfs.insert(File::marker("assets")).unwrap();
        vfs.insert(File::text("assets/x.css", "")).unwrap();
        vfs.insert(File::text("assets-backup/x.css", "")).unwrap();
        let removed = vfs.remove_folder("assets");
        assert_eq!(removed, 2);
        assert!(!vfs.contains("assets/.keep"));
        assert!(!vfs.contains("assets/x.css"));
        assert!(vfs.contains("assets-backup/x.css"));
    }

    #[test]
    fn create_folder_inserts_marker() {
        let mut vfs = Vfs::new();
        let folder = vfs.create_folder("a/b").unwrap();
        assert_eq!(folder, "a/b");
        assert!(vfs.contains("a/b/.keep"));
        assert!(vfs.get("a/b/.keep").unwrap().is_marker());
    }

    #[test]
    fn iteration_is_sorted_by_path() {
        let mut vfs = Vfs::new();
        vfs.insert(File::text("b.txt", "")).unwrap();
        vfs.insert(File::text("a.txt", "")).unwrap();
        vfs.insert(File::text("a/c.txt", "")).unwrap();
        let paths: Vec<&str> = vfs.paths().collect();
        assert_eq!(paths, vec!["a.txt", "a/c.txt", "b.txt"]);
    }
}
