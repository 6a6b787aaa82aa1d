//! The File record: one path-keyed entry in a project.

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use stitch_paths::{mime_for, normalize};

/// Reserved file name that marks an otherwise-empty folder.
pub const FOLDER_MARKER: &str = ".keep";

/// The marker path for a folder, e.g. `assets` -> `assets/.keep`.
pub fn marker_path(folder: &str) -> String {
    format!("{folder}/{FOLDER_MARKER}")
}

/// Whether a path is a folder marker.
pub fn is_marker_path(path: &str) -> bool {
    path.rsplit('/').next() == Some(FOLDER_MARKER)
}

/// Whether a file holds editable text or opaque bytes.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    Binary,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Text => write!(f, "text"),
            FileKind::Binary => write!(f, "binary"),
        }
    }
}

/// File contents. The kind and the data representation agree by construction:
/// text is a `String`, binary is a byte buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileBody {
    Text(String),
    Binary(Bytes),
}

impl FileBody {
    pub fn kind(&self) -> FileKind {
        match self {
            FileBody::Text(_) => FileKind::Text,
            FileBody::Binary(_) => FileKind::Binary,
        }
    }

    /// The contents as bytes; text bodies yield their UTF-8 encoding.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileBody::Text(text) => text.as_bytes(),
            FileBody::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileBody::Text(text) => Some(text),
            FileBody::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// One entry in the virtual file system.
///
/// The path is normalized and the MIME type is derived from it at
/// construction and on every rename; neither can drift out of sync with the
/// other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    path: String,
    body: FileBody,
    mime: &'static str,
}

impl File {
    /// Build a file at a normalized path. The MIME type comes from the fixed
    /// extension table.
    pub fn new(path: impl Into<String>, body: FileBody) -> Self {
        let path = normalize(&path.into());
        let mime = mime_for(&path);
        File { path, body, mime }
    }

    /// Convenience constructor for a text file.
    pub fn text(path: impl Into<String>, data: impl Into<String>) -> Self {
        File::new(path, FileBody::Text(data.into()))
    }

    /// Convenience constructor for a binary file.
    pub fn binary(path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        File::new(path, FileBody::Binary(data.into()))
    }

    /// The zero-byte marker that keeps an empty folder alive.
    pub fn marker(folder: &str) -> Self {
        File::binary(marker_path(folder), Bytes::new())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &FileBody {
        &self.body
    }

    pub fn kind(&self) -> FileKind {
        self.body.kind()
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn is_marker(&self) -> bool {
        is_marker_path(&self.path)
    }

    /// Replace the text contents. Returns `false` without coercing if the
    /// file is binary.
    pub fn set_text(&mut self, data: impl Into<String>) -> bool {
        match &mut self.body {
            FileBody::Text(text) => {
                *text = data.into();
                true
            }
            FileBody::Binary(_) => false,
        }
    }

    /// Replace the contents wholesale.
    pub fn set_body(&mut self, body: FileBody) {
        self.body = body;
    }

    /// Move the file to an already-normalized path, recomputing the MIME
    /// type. Crate-internal: the `Vfs` validates the target first.
    pub(crate) fn relocate(&mut self, path: String) {
        self.mime = mime_for(&path);
        self.path = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_path_and_derives_mime() {
        let file = File::text("./css//main.css", "body {}");
        assert_eq!(file.path(), "css/main.css");
        assert_eq!(file.mime(), "text/css");
        assert_eq!(file.kind(), FileKind::Text);
    }

    #[test]
    fn binary_body_reports_binary_kind() {
        let file = File::binary("img/x.png", vec![137u8, 80, 78, 71]);
        assert_eq!(file.kind(), FileKind::Binary);
        assert_eq!(file.mime(), "image/png");
        assert_eq!(file.body().as_bytes(), &[137u8, 80, 78, 71][..]);
    }

    #[test]
    fn relocate_recomputes_mime() {
        let mut file = File::text("style.css", "body {}");
        file.relocate("style.txt".to_string());
        assert_eq!(file.mime(), "text/plain");
        assert_eq!(file.path(), "style.txt");
        assert_eq!(file.body().as_text(), Some("body {}"));
    }

    #[test]
    fn set_text_refuses_binary() {
        let mut file = File::binary("logo.png", Bytes::new());
        assert!(!file.set_text("oops"));
        let mut file = File::text("a.txt", "old");
        assert!(file.set_text("new"));
        assert_eq!(file.body().as_text(), Some("new"));
    }

    #[test]
    fn marker_paths_round_trip() {
        assert_eq!(marker_path("assets"), "assets/.keep");
        assert!(is_marker_path("assets/.keep"));
        assert!(is_marker_path(".keep"));
        assert!(!is_marker_path("assets/keep"));
        assert!(File::marker("assets").is_marker());
        assert!(File::marker("assets").body().is_empty());
    }
}
