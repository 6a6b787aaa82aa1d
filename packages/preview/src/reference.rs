//! The three reference contexts the engine rewrites.

/// Where a reference was found. Each context has its own rewriter; the
/// closed set makes the dispatch in the walkers exhaustive.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum RefSite {
    /// An attribute on a markup element (`href`, `src`).
    MarkupSource,
    /// A `url(...)` inside style text.
    StyleUrl,
    /// A static or dynamic import specifier inside a module script.
    ScriptImport,
}

impl RefSite {
    /// The label used in warning text.
    pub fn context_label(self) -> &'static str {
        match self {
            RefSite::MarkupSource => "HTML",
            RefSite::StyleUrl => "CSS",
            RefSite::ScriptImport => "JS",
        }
    }

    /// The warning recorded for a rooted (single-leading-slash) reference.
    pub fn absolute_warning(self, reference: &str) -> String {
        format!("Absolute path in {}: {}", self.context_label(), reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_text_carries_context_and_reference() {
        assert_eq!(
            RefSite::MarkupSource.absolute_warning("/etc/passwd"),
            "Absolute path in HTML: /etc/passwd"
        );
        assert_eq!(
            RefSite::StyleUrl.absolute_warning("/bg.png"),
            "Absolute path in CSS: /bg.png"
        );
        assert_eq!(
            RefSite::ScriptImport.absolute_warning("/lib.js"),
            "Absolute path in JS: /lib.js"
        );
    }
}
