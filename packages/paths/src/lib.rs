//! Stitch path utilities: the leaf layer of the stack.
//!
//! Everything at this level is pure string manipulation - no filesystem, no
//! store state, no I/O. Paths in a Stitch project are `/`-separated relative
//! strings with no empty, `.`, or `..` segments; [`normalize`] is the single
//! entry point that establishes that form.
//!
//! Use this layer for:
//! - Normalizing user-entered or imported file paths
//! - Resolving relative references found in markup, style sheets, and scripts
//! - Classifying a reference before deciding whether it can resolve at all
//! - Deriving MIME types and text/binary kinds from file extensions

mod mime;
mod path;

pub use mime::{is_text_path, mime_for, DEFAULT_MIME};
pub use path::{classify, dirname, extension, is_hidden, normalize, resolve, RefClass};
