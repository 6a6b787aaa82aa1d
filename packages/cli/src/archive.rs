//! The zip archive collaborator.
//!
//! The core only ever sees flat `(path, body)` entries: this module owns the
//! zip container, the single-common-root strip, and the hidden-entry filter
//! on import, and packs `export_archive()` (the file list minus folder
//! markers) on export.

use std::collections::BTreeSet;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use stitch_paths::{is_hidden, is_text_path, normalize};
use stitch_vfs::{ArchiveEntry, FileBody, Vfs};

use crate::error::CliError;

/// Read a zip into flat archive entries, stripped and filtered.
pub(crate) fn unpack_zip(path: &Path) -> Result<Vec<ArchiveEntry>, CliError> {
    let file = fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut raw: Vec<(String, Vec<u8>)> = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let normalized = normalize(entry.name());
        if normalized.is_empty() || is_hidden(&normalized) {
            continue;
        }
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        raw.push((normalized, data));
    }

    let entries = strip_common_root(raw)
        .into_iter()
        .filter(|(path, _)| !path.is_empty() && !is_hidden(path))
        .map(|(path, data)| {
            let body = if is_text_path(&path) {
                FileBody::Text(String::from_utf8_lossy(&data).into_owned())
            } else {
                FileBody::Binary(data.into())
            };
            ArchiveEntry::new(path, body)
        })
        .collect();
    Ok(entries)
}

/// If every entry sits under one shared top-level folder, peel it off.
fn strip_common_root(entries: Vec<(String, Vec<u8>)>) -> Vec<(String, Vec<u8>)> {
    let roots: BTreeSet<&str> = entries
        .iter()
        .filter_map(|(path, _)| path.split('/').next())
        .collect();
    let single_root = roots.len() == 1 && entries.iter().all(|(path, _)| path.contains('/'));
    let Some(root) = roots.into_iter().next().filter(|_| single_root) else {
        return entries;
    };
    let prefix = format!("{root}/");
    entries
        .into_iter()
        .map(|(path, data)| {
            let stripped = path
                .strip_prefix(&prefix)
                .map(str::to_string)
                .unwrap_or(path);
            (stripped, data)
        })
        .collect()
}

/// Pack the exportable files (no folder markers) into a zip.
pub(crate) fn pack_zip(vfs: &Vfs, path: &Path) -> Result<(), CliError> {
    let file = fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for entry in vfs.export_archive() {
        zip.start_file(entry.path(), options)?;
        zip.write_all(entry.body().as_bytes())?;
    }
    zip.finish()?;
    Ok(())
}
