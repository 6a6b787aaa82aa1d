//! The asset resolution engine.
//!
//! Given a project's file store and an entry document, one resolution pass
//! walks the reference graph - markup attributes, style-sheet `url(...)`
//! references, module import specifiers - and rewrites every resolvable
//! relative reference to an ephemeral local resource handle, producing a
//! single self-contained document plus a list of policy warnings.
//!
//! The engine never fails a pass: a missing or binary entry degrades to a
//! placeholder document, dangling relative references pass through verbatim
//! and silently, and rooted references pass through with a warning. The only
//! state that survives a pass is the set of live handles, which the next
//! pass releases before doing any work.

mod context;
mod css;
mod host;
mod html;
mod reference;
mod renderer;
mod script;
mod warnings;

pub use host::{MemoryHost, Resource, ResourceHost};
pub use reference::RefSite;
pub use renderer::{RenderOutput, Renderer, PLACEHOLDER_DOCUMENT};
