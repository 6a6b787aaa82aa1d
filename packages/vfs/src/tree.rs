//! Display tree built from the flat path map.
//!
//! Folders sort before files and each group is alphabetical by name. The
//! comparison is byte-wise (case-sensitive), which matches the store's own
//! ordering; `tree_orders_folders_first_then_files` pins that choice.

use std::collections::{BTreeMap, BTreeSet};

use crate::file::is_marker_path;
use crate::vfs::Vfs;

/// One node of the display tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreeNode {
    Folder {
        name: String,
        path: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        path: String,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Folder { path, .. } | TreeNode::File { path, .. } => path,
        }
    }
}

#[derive(Default)]
struct Level {
    folders: BTreeMap<String, Level>,
    files: BTreeSet<String>,
}

impl Level {
    fn insert(&mut self, segments: &[&str]) {
        match segments {
            [] => {}
            [file] => {
                self.files.insert((*file).to_string());
            }
            [folder, rest @ ..] => {
                self.folders
                    .entry((*folder).to_string())
                    .or_default()
                    .insert(rest);
            }
        }
    }

    fn insert_folder(&mut self, segments: &[&str]) {
        if let [folder, rest @ ..] = segments {
            self.folders
                .entry((*folder).to_string())
                .or_default()
                .insert_folder(rest);
        }
    }

    fn into_nodes(self, prefix: &str) -> Vec<TreeNode> {
        let mut nodes = Vec::with_capacity(self.folders.len() + self.files.len());
        for (name, level) in self.folders {
            let path = join(prefix, &name);
            let children = level.into_nodes(&path);
            nodes.push(TreeNode::Folder {
                name,
                path,
                children,
            });
        }
        for name in self.files {
            let path = join(prefix, &name);
            nodes.push(TreeNode::File { name, path });
        }
        nodes
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Build the nested display tree for a store.
///
/// Folder markers are not listed as files, but the folders they hold open do
/// appear.
pub fn build_tree(vfs: &Vfs) -> Vec<TreeNode> {
    let mut root = Level::default();
    for path in vfs.paths() {
        let segments: Vec<&str> = path.split('/').collect();
        if is_marker_path(path) {
            // Keep the folder chain, drop the marker itself.
            root.insert_folder(&segments[..segments.len() - 1]);
            continue;
        }
        root.insert(&segments);
    }
    root.into_nodes("")
}
