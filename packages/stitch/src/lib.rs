//! Stitch: an in-memory multi-file site workspace with live preview
//! resolution.
//!
//! A project is a flat path-keyed store of text and binary files. The
//! preview engine walks the reference graph from the entry document -
//! markup attributes, style-sheet `url(...)` references, module import
//! specifiers - and rewrites everything resolvable into ephemeral local
//! resource handles, yielding one self-contained document plus policy
//! warnings.
//!
//! ```rust
//! use stitch::preview::{MemoryHost, Renderer};
//! use stitch::vfs::{File, Vfs};
//!
//! let mut vfs = Vfs::new();
//! vfs.insert(File::text(
//!     "index.html",
//!     "<link rel=\"stylesheet\" href=\"css/a.css\">",
//! ))
//! .unwrap();
//! vfs.insert(File::text("css/a.css", "body { color: teal; }")).unwrap();
//!
//! let mut renderer = Renderer::new(MemoryHost::new());
//! let output = renderer.render(&vfs);
//! assert!(output.document.contains("href=\"blob:stitch/"));
//! ```

pub use stitch_paths as paths;
pub use stitch_preview as preview;
pub use stitch_project as project;
pub use stitch_vfs as vfs;
