//! Markup parsing, reference-bearing node rewriting, and serialization.
//!
//! The contract with the markup library is deliberately small: parse to a
//! tree, find nodes by tag and attribute, mutate attribute values, serialize
//! back. Nodes process in a fixed order - links, scripts, remaining `src`
//! carriers, then inline style blocks - which also fixes the insertion order
//! of warnings.

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{local_name, parse_document, Attribute, LocalName, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use stitch_paths::{classify, dirname, resolve, RefClass};
use stitch_vfs::FileBody;

use crate::context::{lookup, RenderContext};
use crate::css::rewrite_css_urls;
use crate::host::ResourceHost;
use crate::reference::RefSite;
use crate::script::module_handle;

pub(crate) fn parse_html(source: &str) -> RcDom {
    parse_document(RcDom::default(), ParseOpts::default()).one(source)
}

/// Serialize the document element (not the whole document - the doctype is
/// prepended separately by the renderer).
pub(crate) fn serialize_document(dom: &RcDom) -> String {
    let root = dom
        .document
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned();
    let Some(root) = root else {
        return String::new();
    };
    let mut buf = Vec::new();
    let serializable: SerializableHandle = root.into();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..SerializeOpts::default()
    };
    if serialize(&mut buf, &serializable, opts).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

fn attr_value(attrs: &[Attribute], name: &LocalName) -> Option<String> {
    attrs
        .iter()
        .find(|attr| attr.name.local == *name)
        .map(|attr| attr.value.to_string())
}

fn set_attr(attrs: &mut [Attribute], name: &LocalName, value: &str) {
    if let Some(attr) = attrs.iter_mut().find(|attr| attr.name.local == *name) {
        attr.value = StrTendril::from_slice(value);
    }
}

fn collect_elements(node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Element { .. } = child.data {
            out.push(child.clone());
        }
        collect_elements(child, out);
    }
}

/// Classify a markup reference, recording the rooted warning. Returns the
/// reference only when it is worth resolving.
fn resolvable<H: ResourceHost>(
    reference: Option<String>,
    ctx: &mut RenderContext<'_, H>,
) -> Option<String> {
    let reference = reference?;
    match classify(&reference) {
        RefClass::External => None,
        RefClass::Rooted => {
            ctx.warnings
                .push(RefSite::MarkupSource.absolute_warning(&reference));
            None
        }
        RefClass::Relative => Some(reference),
    }
}

/// Rewrite every reference-bearing node in the tree against the entry
/// document's directory.
pub(crate) fn rewrite_document<H: ResourceHost>(
    dom: &RcDom,
    entry_path: &str,
    ctx: &mut RenderContext<'_, H>,
) {
    let base_dir = dirname(entry_path).to_string();

    let mut elements = Vec::new();
    collect_elements(&dom.document, &mut elements);

    let mut links = Vec::new();
    let mut scripts = Vec::new();
    let mut sources = Vec::new();
    let mut styles = Vec::new();
    for node in &elements {
        let NodeData::Element { name, attrs, .. } = &node.data else {
            continue;
        };
        let tag = &name.local;
        if *tag == local_name!("link") {
            links.push(node.clone());
        } else if *tag == local_name!("script") {
            scripts.push(node.clone());
        } else if *tag == local_name!("style") {
            styles.push(node.clone());
        } else if attrs
            .borrow()
            .iter()
            .any(|attr| attr.name.local == local_name!("src"))
        {
            sources.push(node.clone());
        }
    }

    for node in &links {
        process_link(node, &base_dir, ctx);
    }
    for node in &scripts {
        process_script(node, &base_dir, ctx);
    }
    for node in &sources {
        process_source(node, &base_dir, ctx);
    }
    for node in &styles {
        process_style(node, &base_dir, ctx);
    }
}

fn process_link<H: ResourceHost>(node: &Handle, base_dir: &str, ctx: &mut RenderContext<'_, H>) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let (href, rel) = {
        let attrs = attrs.borrow();
        (
            attr_value(&attrs, &local_name!("href")),
            attr_value(&attrs, &local_name!("rel")),
        )
    };
    let Some(href) = resolvable(href, ctx) else {
        return;
    };
    let resolved = resolve(base_dir, &href);
    let vfs = ctx.vfs;
    let Some(file) = lookup(vfs, &resolved) else {
        return;
    };

    let handle = if rel.as_deref() == Some("stylesheet") {
        // A binary file linked as a stylesheet rewrites as empty text.
        let css = match file.body() {
            FileBody::Text(text) => text.clone(),
            FileBody::Binary(_) => String::new(),
        };
        // The sheet's own directory is the base for its nested references.
        let rewritten = rewrite_css_urls(&css, dirname(&resolved), ctx);
        ctx.materialize("text/css", rewritten.as_bytes())
    } else {
        ctx.materialize(file.mime(), file.body().as_bytes())
    };
    set_attr(&mut attrs.borrow_mut(), &local_name!("href"), &handle);
}

fn process_script<H: ResourceHost>(node: &Handle, base_dir: &str, ctx: &mut RenderContext<'_, H>) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let (src, kind) = {
        let attrs = attrs.borrow();
        (
            attr_value(&attrs, &local_name!("src")),
            attr_value(&attrs, &local_name!("type")),
        )
    };
    let Some(src) = resolvable(src, ctx) else {
        return;
    };
    let resolved = resolve(base_dir, &src);
    let is_module = kind.as_deref().is_some_and(|t| t.eq_ignore_ascii_case("module"));

    let handle = if is_module {
        match module_handle(&resolved, ctx) {
            Some(handle) => handle,
            None => return,
        }
    } else {
        // Non-module scripts are opaque: their contents are never rewritten.
        let vfs = ctx.vfs;
        let Some(file) = lookup(vfs, &resolved) else {
            return;
        };
        ctx.materialize(file.mime(), file.body().as_bytes())
    };
    set_attr(&mut attrs.borrow_mut(), &local_name!("src"), &handle);
}

fn process_source<H: ResourceHost>(node: &Handle, base_dir: &str, ctx: &mut RenderContext<'_, H>) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let src = {
        let attrs = attrs.borrow();
        attr_value(&attrs, &local_name!("src"))
    };
    let Some(src) = resolvable(src, ctx) else {
        return;
    };
    let resolved = resolve(base_dir, &src);
    let vfs = ctx.vfs;
    let Some(file) = lookup(vfs, &resolved) else {
        return;
    };
    let handle = ctx.materialize(file.mime(), file.body().as_bytes());
    set_attr(&mut attrs.borrow_mut(), &local_name!("src"), &handle);
}

fn process_style<H: ResourceHost>(node: &Handle, base_dir: &str, ctx: &mut RenderContext<'_, H>) {
    for child in node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            let css = contents.borrow().to_string();
            let rewritten = rewrite_css_urls(&css, base_dir, ctx);
            if rewritten != css {
                *contents.borrow_mut() = StrTendril::from_slice(&rewritten);
            }
        }
    }
}
