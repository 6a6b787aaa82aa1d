//! The render pass driver.

use stitch_vfs::{File, FileBody, Vfs};
use tracing::debug;

use crate::context::RenderContext;
use crate::host::ResourceHost;
use crate::html::{parse_html, rewrite_document, serialize_document};

/// Document used when the store has no renderable markup entry.
pub const PLACEHOLDER_DOCUMENT: &str =
    "<!doctype html><html><body><p>No HTML file found.</p></body></html>";

/// The result of one resolution pass: a complete renderable document and the
/// pass's policy warnings, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    pub document: String,
    pub warnings: Vec<String>,
}

/// Runs resolution passes against a [`ResourceHost`].
///
/// The renderer owns the only state that crosses passes: the handles
/// materialized by the previous pass, which it releases before starting the
/// next one so resources never pile up across refreshes.
///
/// # Examples
///
/// ```rust
/// use stitch_preview::{MemoryHost, Renderer};
/// use stitch_vfs::{File, Vfs};
///
/// let mut vfs = Vfs::new();
/// vfs.insert(File::text("index.html", "<h1>hi</h1>")).unwrap();
///
/// let mut renderer = Renderer::new(MemoryHost::new());
/// let output = renderer.render(&vfs);
/// assert!(output.document.starts_with("<!doctype html>\n"));
/// assert!(output.warnings.is_empty());
/// ```
#[derive(Debug)]
pub struct Renderer<H: ResourceHost> {
    host: H,
    live: Vec<String>,
}

impl<H: ResourceHost> Renderer<H> {
    pub fn new(host: H) -> Self {
        Renderer {
            host,
            live: Vec::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Handles materialized by the most recent pass.
    pub fn live_handles(&self) -> &[String] {
        &self.live
    }

    /// Release every handle still held from the previous pass.
    pub fn release_all(&mut self) {
        for handle in self.live.drain(..) {
            self.host.release(&handle);
        }
    }

    /// Run one full resolution pass over the current store state.
    pub fn render(&mut self, vfs: &Vfs) -> RenderOutput {
        self.release_all();

        let mut source = PLACEHOLDER_DOCUMENT.to_string();
        let mut entry_path = "index.html".to_string();
        if let Some(file) = select_entry(vfs) {
            // A binary entry degrades to the placeholder rather than failing.
            if let FileBody::Text(text) = file.body() {
                source = text.clone();
                entry_path = file.path().to_string();
            }
        }

        let dom = parse_html(&source);
        let mut ctx = RenderContext::new(vfs, &mut self.host);
        rewrite_document(&dom, &entry_path, &mut ctx);

        let RenderContext {
            warnings, handles, ..
        } = ctx;
        self.live = handles;

        let document = format!("<!doctype html>\n{}", serialize_document(&dom));
        let warnings = warnings.into_vec();
        debug!(
            entry = %entry_path,
            handles = self.live.len(),
            warnings = warnings.len(),
            "render pass complete"
        );
        RenderOutput { document, warnings }
    }
}

/// Entry selection: `index.html` if present, else the first `.html` file by
/// sorted path.
fn select_entry(vfs: &Vfs) -> Option<&File> {
    if let Some(file) = vfs.get("index.html") {
        return Some(file);
    }
    vfs.iter().find(|file| file.path().ends_with(".html"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn empty_store_renders_placeholder() {
        let vfs = Vfs::new();
        let mut renderer = Renderer::new(MemoryHost::new());
        let output = renderer.render(&vfs);
        assert!(output.document.starts_with("<!doctype html>\n"));
        assert!(output.document.contains("No HTML file found."));
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn index_html_wins_over_sorted_order() {
        let mut vfs = Vfs::new();
        vfs.insert(File::text("about.html", "<p>about</p>")).unwrap();
        vfs.insert(File::text("index.html", "<p>index</p>")).unwrap();
        let mut renderer = Renderer::new(MemoryHost::new());
        let output = renderer.render(&vfs);
        assert!(output.document.contains("<p>index</p>"));
    }

    #[test]
    fn first_markup_file_by_sorted_path_is_fallback() {
        let mut vfs = Vfs::new();
        vfs.insert(File::text("zeta.html", "<p>z</p>")).unwrap();
        vfs.insert(File::text("alpha.html", "<p>a</p>")).unwrap();
        vfs.insert(File::text("aaa.css", "body {}")).unwrap();
        let mut renderer = Renderer::new(MemoryHost::new());
        let output = renderer.render(&vfs);
        assert!(output.document.contains("<p>a</p>"));
    }

    #[test]
    fn binary_entry_degrades_to_placeholder() {
        let mut vfs = Vfs::new();
        vfs.insert(File::binary("index.html", vec![0u8, 1, 2])).unwrap();
        let mut renderer = Renderer::new(MemoryHost::new());
        let output = renderer.render(&vfs);
        assert!(output.document.contains("No HTML file found."));
    }

    #[test]
    fn malformed_markup_still_produces_a_document() {
        let mut vfs = Vfs::new();
        vfs.insert(File::text("index.html", "<div><p>unclosed")).unwrap();
        let mut renderer = Renderer::new(MemoryHost::new());
        let output = renderer.render(&vfs);
        assert!(output.document.starts_with("<!doctype html>\n<html>"));
        assert!(output.document.contains("unclosed"));
    }
}
