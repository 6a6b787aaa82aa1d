//! The persisted project blob.

use serde::{Deserialize, Serialize};
use stitch_vfs::FileSnapshot;

use crate::project::DEFAULT_PROJECT_NAME;

fn default_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

/// Everything the persistence collaborator stores for one project, keyed by
/// `id` in whatever store it owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator: String,
    /// Milliseconds since the Unix epoch, stamped by the caller at snapshot
    /// time.
    #[serde(default, rename = "updatedAt")]
    pub updated_at: u64,
    pub files: Vec<FileSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_metadata_fields_default() {
        let snapshot: ProjectSnapshot =
            serde_json::from_str(r#"{"id": "p1", "files": []}"#).unwrap();
        assert_eq!(snapshot.name, "Untitled Project");
        assert_eq!(snapshot.description, "");
        assert_eq!(snapshot.updated_at, 0);
    }

    #[test]
    fn updated_at_uses_camel_case_on_the_wire() {
        let snapshot = ProjectSnapshot {
            id: "p1".to_string(),
            name: "Test".to_string(),
            description: String::new(),
            creator: String::new(),
            updated_at: 42,
            files: Vec::new(),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"updatedAt\":42"), "{json}");
    }
}
