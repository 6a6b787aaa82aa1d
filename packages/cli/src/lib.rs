//! # stitch-cli
//!
//! Command-line driver for Stitch projects.
//!
//! Projects live as JSON blobs in a store directory (default `.stitch`).
//! Mutating commands run the same debounced pipeline the editor uses: the
//! edit marks both timers, the render pass fires first and prints its
//! warnings, the persistence pass saves the snapshot.
//!
//! ```bash
//! stitch new demo
//! stitch ls demo
//! stitch set demo css/extra.css --text "body { margin: 0 }"
//! stitch render demo --out preview.html
//! stitch export demo demo.zip
//! ```

mod archive;
mod commands;
mod error;

pub use commands::run;
pub use error::CliError;
