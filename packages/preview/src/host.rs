//! Materialization of file bytes into local resource handles.
//!
//! A handle is an opaque string that stands in for materialized bytes in the
//! output document. Handles are pass-scoped: the renderer releases every
//! handle from pass N before pass N+1 starts, so a host never holds more
//! than one pass's worth of resources.

use std::collections::HashMap;

use bytes::Bytes;

/// Where materialized resources live.
///
/// The render surface supplies the real implementation (in a browser this is
/// the object-URL store); [`MemoryHost`] backs tests and the CLI.
pub trait ResourceHost {
    /// Store a resource and return its handle.
    fn materialize(&mut self, mime: &str, data: &[u8]) -> String;

    /// Drop the resource behind a handle. Unknown handles are ignored.
    fn release(&mut self, handle: &str);
}

/// A materialized resource held by [`MemoryHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub mime: String,
    pub data: Bytes,
}

/// An in-memory [`ResourceHost`] with counter-numbered `blob:stitch/<n>`
/// handles.
///
/// The `blob:` scheme classifies as external, so a document that has already
/// been rewritten never re-resolves its own handles.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next: u64,
    resources: HashMap<String, Resource>,
}

impl MemoryHost {
    pub fn new() -> Self {
        MemoryHost::default()
    }

    pub fn get(&self, handle: &str) -> Option<&Resource> {
        self.resources.get(handle)
    }

    /// Number of live resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceHost for MemoryHost {
    fn materialize(&mut self, mime: &str, data: &[u8]) -> String {
        let handle = format!("blob:stitch/{}", self.next);
        self.next += 1;
        self.resources.insert(
            handle.clone(),
            Resource {
                mime: mime.to_string(),
                data: Bytes::copy_from_slice(data),
            },
        );
        handle
    }

    fn release(&mut self, handle: &str) {
        self.resources.remove(handle);
    }
}
