//! Per-pass resolution state.

use std::collections::{HashMap, HashSet};

use stitch_vfs::{is_marker_path, File, Vfs};

use crate::host::ResourceHost;
use crate::warnings::Warnings;

/// State created fresh for each resolution pass and torn down at its end.
///
/// Holds the module cache (resolved script path -> handle) that guarantees a
/// module reached from several import edges materializes exactly once, the
/// in-progress set that breaks import cycles, the warning set, and the list
/// of every handle materialized so far - the renderer takes that list over
/// as the pass's live handles.
pub(crate) struct RenderContext<'a, H: ResourceHost> {
    pub vfs: &'a Vfs,
    pub host: &'a mut H,
    pub warnings: Warnings,
    pub modules: HashMap<String, String>,
    pub visiting: HashSet<String>,
    pub handles: Vec<String>,
}

impl<'a, H: ResourceHost> RenderContext<'a, H> {
    pub fn new(vfs: &'a Vfs, host: &'a mut H) -> Self {
        RenderContext {
            vfs,
            host,
            warnings: Warnings::new(),
            modules: HashMap::new(),
            visiting: HashSet::new(),
            handles: Vec::new(),
        }
    }

    /// Materialize bytes on the host and track the handle for release at the
    /// start of the next pass.
    pub fn materialize(&mut self, mime: &str, data: &[u8]) -> String {
        let handle = self.host.materialize(mime, data);
        self.handles.push(handle.clone());
        handle
    }
}

/// Resolution-time lookup: folder markers are reserved and never resolve.
pub(crate) fn lookup<'v>(vfs: &'v Vfs, path: &str) -> Option<&'v File> {
    if is_marker_path(path) {
        return None;
    }
    vfs.get(path)
}
