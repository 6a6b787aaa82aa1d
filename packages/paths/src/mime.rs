//! Fixed extension tables.
//!
//! MIME types are derived from a path's extension at file creation and rename
//! time; unknown extensions fall back to [`DEFAULT_MIME`]. The text set
//! decides whether uploaded or imported bytes become a text or binary file.

use crate::path::extension;

/// Fallback MIME type for unrecognized extensions.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Look up the MIME type for a path from the fixed extension table.
///
/// # Examples
///
/// ```rust
/// use stitch_paths::mime_for;
///
/// assert_eq!(mime_for("index.html"), "text/html");
/// assert_eq!(mime_for("img/Logo.PNG"), "image/png");
/// assert_eq!(mime_for("unknown.bin"), "application/octet-stream");
/// ```
pub fn mime_for(path: &str) -> &'static str {
    match extension(path).as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" => "audio/ogg",
        _ => DEFAULT_MIME,
    }
}

/// Whether a path's extension marks it as editable text.
pub fn is_text_path(path: &str) -> bool {
    matches!(
        extension(path).as_str(),
        "html" | "htm" | "css" | "js" | "json" | "txt" | "md" | "svg" | "csv"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map() {
        assert_eq!(mime_for("style.css"), "text/css");
        assert_eq!(mime_for("script.js"), "text/javascript");
        assert_eq!(mime_for("notes.md"), "text/markdown");
        assert_eq!(mime_for("icon.svg"), "image/svg+xml");
        assert_eq!(mime_for("song.mp3"), "audio/mpeg");
        assert_eq!(mime_for("clip.webm"), "video/webm");
    }

    #[test]
    fn unknown_extension_defaults_to_octet_stream() {
        assert_eq!(mime_for("archive.tar.xz"), DEFAULT_MIME);
        assert_eq!(mime_for("no_extension"), DEFAULT_MIME);
        assert_eq!(mime_for("assets/.keep"), DEFAULT_MIME);
    }

    #[test]
    fn text_set_matches_editable_extensions() {
        assert!(is_text_path("index.html"));
        assert!(is_text_path("data.csv"));
        assert!(is_text_path("icon.svg"));
        assert!(!is_text_path("logo.png"));
        assert!(!is_text_path("assets/.keep"));
    }

    #[test]
    fn csv_is_text_but_has_no_mime_entry() {
        assert!(is_text_path("table.csv"));
        assert_eq!(mime_for("table.csv"), DEFAULT_MIME);
    }
}
