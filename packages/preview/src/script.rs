//! Module script rewriting.
//!
//! Only scripts explicitly flagged as modules get their import specifiers
//! rewritten; a plain script is opaque text. Each module resolves against
//! its own directory and materializes at most once per pass via the module
//! cache, however many import edges reach it. An import that closes a cycle
//! keeps its original specifier, the same pass-through used for a missing
//! file.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use stitch_paths::{classify, dirname, resolve, RefClass};
use stitch_vfs::FileBody;
use tracing::debug;

use crate::context::{lookup, RenderContext};
use crate::host::ResourceHost;
use crate::reference::RefSite;

lazy_static! {
    // `import defaults, { named } from "./dep.js"`, `import "./dep.js"`,
    // `export { x } from "./dep.js"`, `export * from "./dep.js"`.
    static ref STATIC_IMPORT: Regex =
        Regex::new(r#"\b(import|export)(\s+[^'"()]*?\s+from)?\s*(['"])([^'"]+)(['"])"#).unwrap();
    // `import("./dep.js")`
    static ref DYNAMIC_IMPORT: Regex =
        Regex::new(r#"\bimport\s*\(\s*(['"])([^'"]+)(['"])\s*\)"#).unwrap();
}

/// Resolve one specifier to a handle, or `None` to leave it untouched.
fn specifier_handle<H: ResourceHost>(
    specifier: &str,
    base_dir: &str,
    ctx: &mut RenderContext<'_, H>,
) -> Option<String> {
    match classify(specifier) {
        RefClass::External => None,
        RefClass::Rooted => {
            ctx.warnings
                .push(RefSite::ScriptImport.absolute_warning(specifier));
            None
        }
        RefClass::Relative => {
            let resolved = resolve(base_dir, specifier);
            module_handle(&resolved, ctx)
        }
    }
}

/// The handle for a module at a resolved path, materializing it (and,
/// recursively, its own imports) on first sight.
pub(crate) fn module_handle<H: ResourceHost>(
    path: &str,
    ctx: &mut RenderContext<'_, H>,
) -> Option<String> {
    if let Some(handle) = ctx.modules.get(path) {
        return Some(handle.clone());
    }
    if ctx.visiting.contains(path) {
        debug!(path, "import cycle, leaving specifier verbatim");
        return None;
    }
    let vfs = ctx.vfs;
    let file = lookup(vfs, path)?;
    // A binary file used as a module source rewrites as empty text.
    let source = match file.body() {
        FileBody::Text(text) => text.clone(),
        FileBody::Binary(_) => String::new(),
    };

    ctx.visiting.insert(path.to_string());
    let rewritten = rewrite_imports(&source, dirname(path), ctx);
    ctx.visiting.remove(path);

    let handle = ctx.materialize("text/javascript", rewritten.as_bytes());
    ctx.modules.insert(path.to_string(), handle.clone());
    Some(handle)
}

/// Rewrite every static and dynamic import specifier in module source text.
pub(crate) fn rewrite_imports<H: ResourceHost>(
    source: &str,
    base_dir: &str,
    ctx: &mut RenderContext<'_, H>,
) -> String {
    let statics = STATIC_IMPORT.replace_all(source, |caps: &Captures<'_>| {
        match specifier_handle(&caps[4], base_dir, ctx) {
            Some(handle) => format!(
                "{}{}{}{}{}",
                &caps[1],
                caps.get(2).map_or("", |m| m.as_str()),
                &caps[3],
                handle,
                &caps[5]
            ),
            None => caps[0].to_string(),
        }
    });
    DYNAMIC_IMPORT
        .replace_all(&statics, |caps: &Captures<'_>| {
            match specifier_handle(&caps[2], base_dir, ctx) {
                Some(handle) => format!("import({}{}{})", &caps[1], handle, &caps[3]),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
