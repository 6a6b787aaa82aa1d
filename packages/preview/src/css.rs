//! Style-sheet `url(...)` rewriting.
//!
//! The resolution base is always the containing sheet's own directory, not
//! the entry document's - a sheet in `css/` referencing `../img/x.png`
//! resolves to `img/x.png`.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use stitch_paths::{classify, resolve, RefClass};

use crate::context::{lookup, RenderContext};
use crate::host::ResourceHost;
use crate::reference::RefSite;

lazy_static! {
    static ref CSS_URL: Regex = Regex::new(r"url\(([^)]+)\)").unwrap();
}

/// Strip at most one matching pair of quotes, mirroring how a browser reads
/// `url("x")`, `url('x')`, and `url(x)` alike.
fn strip_quotes(raw: &str) -> &str {
    let s = raw
        .strip_prefix('"')
        .or_else(|| raw.strip_prefix('\''))
        .unwrap_or(raw);
    s.strip_suffix('"')
        .or_else(|| s.strip_suffix('\''))
        .unwrap_or(s)
}

/// Rewrite every `url(...)` in `css` whose reference resolves to a stored
/// file. External references stay untouched, rooted references stay
/// untouched and warn, and dangling relative references stay untouched
/// silently.
pub(crate) fn rewrite_css_urls<H: ResourceHost>(
    css: &str,
    base_dir: &str,
    ctx: &mut RenderContext<'_, H>,
) -> String {
    CSS_URL
        .replace_all(css, |caps: &Captures<'_>| {
            let reference = strip_quotes(caps[1].trim());
            if reference.is_empty() {
                return caps[0].to_string();
            }
            match classify(reference) {
                RefClass::External => caps[0].to_string(),
                RefClass::Rooted => {
                    ctx.warnings.push(RefSite::StyleUrl.absolute_warning(reference));
                    caps[0].to_string()
                }
                RefClass::Relative => {
                    let resolved = resolve(base_dir, reference);
                    let vfs = ctx.vfs;
                    match lookup(vfs, &resolved) {
                        None => caps[0].to_string(),
                        Some(file) => {
                            let handle = ctx.materialize(file.mime(), file.body().as_bytes());
                            format!("url({handle})")
                        }
                    }
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use stitch_vfs::{File, Vfs};

    fn render(css: &str, base_dir: &str, vfs: &Vfs) -> (String, Vec<String>, MemoryHost) {
        let mut host = MemoryHost::new();
        let mut ctx = RenderContext::new(vfs, &mut host);
        let out = rewrite_css_urls(css, base_dir, &mut ctx);
        (out, ctx.warnings.into_vec(), host)
    }

    #[test]
    fn quotes_and_whitespace_are_stripped() {
        assert_eq!(strip_quotes("'x.png'"), "x.png");
        assert_eq!(strip_quotes("\"x.png\""), "x.png");
        assert_eq!(strip_quotes("x.png"), "x.png");
    }

    #[test]
    fn relative_hit_is_materialized() {
        let mut vfs = Vfs::new();
        vfs.insert(File::binary("img/x.png", vec![1u8, 2])).unwrap();
        let (out, warnings, host) =
            render("body { background: url(../img/x.png); }", "css", &vfs);
        assert!(out.contains("url(blob:stitch/"), "{out}");
        assert!(warnings.is_empty());
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn quoted_reference_resolves_too() {
        let mut vfs = Vfs::new();
        vfs.insert(File::binary("img/x.png", vec![1u8])).unwrap();
        let (out, _, _) = render("div { background: url(\"img/x.png\"); }", "", &vfs);
        assert!(out.contains("url(blob:stitch/"));
    }

    #[test]
    fn rooted_reference_warns_and_passes_through() {
        let vfs = Vfs::new();
        let (out, warnings, _) = render("@import url(/etc/passwd);", "", &vfs);
        assert!(out.contains("url(/etc/passwd)"));
        assert_eq!(warnings, vec!["Absolute path in CSS: /etc/passwd".to_string()]);
    }

    #[test]
    fn missing_target_is_silent() {
        let vfs = Vfs::new();
        let (out, warnings, host) = render("div { background: url(missing.png); }", "", &vfs);
        assert!(out.contains("url(missing.png)"));
        assert!(warnings.is_empty());
        assert!(host.is_empty());
    }

    #[test]
    fn external_references_are_untouched() {
        let vfs = Vfs::new();
        let css = "div { background: url(https://example.com/x.png); }";
        let (out, warnings, host) = render(css, "", &vfs);
        assert_eq!(out, css);
        assert!(warnings.is_empty());
        assert!(host.is_empty());
    }
}
