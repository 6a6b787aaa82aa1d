//! Persistence snapshot DTOs.
//!
//! The wire shape is `{path, kind, mime, data}` per file, with text data as
//! a string and binary data as an ordered byte sequence. The persistence
//! collaborator keys the surrounding project blob by project id; this layer
//! has no knowledge of that store.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::file::{File, FileBody, FileKind};
use crate::vfs::Vfs;

/// File data as it appears in the snapshot: a string for text, a byte
/// sequence for binary. Deserialization tries text first, so a JSON string
/// always loads as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotData {
    Text(String),
    Binary(Bytes),
}

/// One serialized file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSnapshot {
    pub path: String,
    pub kind: FileKind,
    pub mime: String,
    pub data: SnapshotData,
}

impl From<&File> for FileSnapshot {
    fn from(file: &File) -> Self {
        let data = match file.body() {
            FileBody::Text(text) => SnapshotData::Text(text.clone()),
            FileBody::Binary(bytes) => SnapshotData::Binary(bytes.clone()),
        };
        FileSnapshot {
            path: file.path().to_string(),
            kind: file.kind(),
            mime: file.mime().to_string(),
            data,
        }
    }
}

impl FileSnapshot {
    /// Rehydrate a [`File`], enforcing the kind/data agreement invariant.
    /// The MIME type is re-derived from the path rather than trusted.
    pub fn into_file(self) -> Result<File, SnapshotError> {
        let body = match (self.kind, self.data) {
            (FileKind::Text, SnapshotData::Text(text)) => FileBody::Text(text),
            (FileKind::Binary, SnapshotData::Binary(bytes)) => FileBody::Binary(bytes),
            (kind, _) => {
                return Err(SnapshotError::KindMismatch {
                    path: self.path,
                    kind,
                })
            }
        };
        Ok(File::new(self.path, body))
    }
}

impl Vfs {
    /// Serialize every file, in path order.
    pub fn snapshot(&self) -> Vec<FileSnapshot> {
        self.iter().map(FileSnapshot::from).collect()
    }

    /// Repopulate a store from a snapshot.
    pub fn restore(
        snapshots: impl IntoIterator<Item = FileSnapshot>,
    ) -> Result<Vfs, SnapshotError> {
        let mut vfs = Vfs::new();
        for snapshot in snapshots {
            let file = snapshot.into_file()?;
            vfs.insert(file)?;
        }
        Ok(vfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trip_is_identical() {
        let mut vfs = Vfs::new();
        vfs.insert(File::text("index.html", "<h1>héllo</h1>")).unwrap();
        vfs.insert(File::binary("img/x.png", vec![0u8, 255, 128, 7]))
            .unwrap();
        vfs.insert(File::marker("assets")).unwrap();

        let snapshots = vfs.snapshot();
        let restored = Vfs::restore(snapshots).unwrap();

        assert_eq!(restored.len(), vfs.len());
        assert_eq!(
            restored.get("index.html").unwrap().body().as_text(),
            Some("<h1>héllo</h1>")
        );
        assert_eq!(
            restored.get("img/x.png").unwrap().body().as_bytes(),
            &[0u8, 255, 128, 7][..]
        );
        assert!(restored.contains("assets/.keep"));
    }

    #[test]
    fn json_round_trip_preserves_binary_bytes() {
        let mut vfs = Vfs::new();
        vfs.insert(File::binary("blob.bin", vec![9u8, 0, 9])).unwrap();
        vfs.insert(File::text("a.txt", "text")).unwrap();

        let json = serde_json::to_string(&vfs.snapshot()).unwrap();
        // Binary data serializes as an ordered byte sequence.
        assert!(json.contains("[9,0,9]"));
        let parsed: Vec<FileSnapshot> = serde_json::from_str(&json).unwrap();
        let restored = Vfs::restore(parsed).unwrap();
        assert_eq!(
            restored.get("blob.bin").unwrap().body().as_bytes(),
            &[9u8, 0, 9][..]
        );
        assert_eq!(restored.get("a.txt").unwrap().body().as_text(), Some("text"));
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let snapshot = FileSnapshot {
            path: "x.txt".to_string(),
            kind: FileKind::Binary,
            mime: "text/plain".to_string(),
            data: SnapshotData::Text("not bytes".to_string()),
        };
        assert!(matches!(
            snapshot.into_file(),
            Err(SnapshotError::KindMismatch { .. })
        ));
    }
}
