//! Argument parsing and command dispatch.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stitch_paths::is_text_path;
use stitch_preview::{MemoryHost, Renderer};
use stitch_project::{JsonDirStore, Project, ProjectStore};
use stitch_vfs::{build_tree, File, TreeNode};

use crate::archive;
use crate::error::CliError;

/// Stitch - build a small multi-file site and preview it without a server
#[derive(Parser, Debug)]
#[command(name = "stitch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the project store
    #[arg(long, global = true, default_value = ".stitch")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a project with the starter files
    New {
        id: String,
        /// Display name (defaults to "Untitled Project")
        #[arg(long)]
        name: Option<String>,
    },
    /// Print a project's file tree
    Ls { id: String },
    /// Add or replace a file, then run the debounced render/save pipeline
    Set {
        id: String,
        /// Project-relative path, e.g. css/main.css
        path: String,
        /// Inline text contents
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// Read contents from a local file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Remove a file (or a whole folder with --folder)
    Rm {
        id: String,
        path: String,
        #[arg(long)]
        folder: bool,
    },
    /// Move a file (or a whole folder with --folder)
    Mv {
        id: String,
        from: String,
        to: String,
        #[arg(long)]
        folder: bool,
    },
    /// Run one resolution pass and emit the preview document
    Render {
        id: String,
        /// Write the document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace a project's files with a zip archive's contents
    Import { zip: PathBuf, id: String },
    /// Pack a project's files into a zip archive
    Export { id: String, zip: PathBuf },
}

pub fn run() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let mut store = JsonDirStore::new(&cli.store)?;

    match cli.command {
        Command::New { id, name } => {
            let project = Project::scaffold(&id, name.as_deref().unwrap_or(""));
            store.save(&project.snapshot(now_ms()))?;
            println!("Created '{}' ({} files)", id, project.vfs().len());
        }
        Command::Ls { id } => {
            let project = load_project(&store, &id)?;
            print_tree(&build_tree(project.vfs()), 0);
        }
        Command::Set {
            id,
            path,
            text,
            file,
        } => {
            let mut project = load_project(&store, &id)?;
            let entry = build_file(&path, text, file)?;
            project.upsert_file(entry, Instant::now())?;
            drive(&mut project, &mut store)?;
            println!("Set {path}");
        }
        Command::Rm { id, path, folder } => {
            let mut project = load_project(&store, &id)?;
            if folder {
                let removed = project.remove_folder(&path, Instant::now());
                println!("Removed {removed} files under {path}/");
            } else if project.remove_file(&path, Instant::now()).is_none() {
                println!("No file at {path}");
            } else {
                println!("Removed {path}");
            }
            drive(&mut project, &mut store)?;
        }
        Command::Mv {
            id,
            from,
            to,
            folder,
        } => {
            let mut project = load_project(&store, &id)?;
            if folder {
                let moved = project.rename_folder(&from, &to, Instant::now())?;
                println!("Moved {moved} files from {from}/ to {to}/");
            } else {
                let target = project.rename_file(&from, &to, Instant::now())?;
                println!("Moved {from} to {target}");
            }
            drive(&mut project, &mut store)?;
        }
        Command::Render { id, out } => {
            let project = load_project(&store, &id)?;
            let mut renderer = Renderer::new(MemoryHost::new());
            let output = renderer.render(project.vfs());
            for warning in &output.warnings {
                eprintln!("warning: {warning}");
            }
            match out {
                Some(path) => {
                    fs::write(&path, &output.document)?;
                    println!("Wrote {}", path.display());
                }
                None => println!("{}", output.document),
            }
        }
        Command::Import { zip, id } => {
            let entries = archive::unpack_zip(&zip)?;
            let mut project = match store.load(&id)? {
                Some(snapshot) => Project::from_snapshot(snapshot)?,
                None => Project::new(&id, &id),
            };
            let count = project.vfs_mut().import_archive(entries)?;
            project.open_first();
            store.save(&project.snapshot(now_ms()))?;
            println!("Imported {count} files into '{id}'");
        }
        Command::Export { id, zip } => {
            let project = load_project(&store, &id)?;
            archive::pack_zip(project.vfs(), &zip)?;
            println!("Wrote {}", zip.display());
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STITCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_project(store: &JsonDirStore, id: &str) -> Result<Project, CliError> {
    let snapshot = store
        .load(id)?
        .ok_or_else(|| CliError::ProjectNotFound { id: id.to_string() })?;
    Ok(Project::from_snapshot(snapshot)?)
}

fn build_file(path: &str, text: Option<String>, source: Option<PathBuf>) -> Result<File, CliError> {
    if let Some(source) = source {
        let data = fs::read(&source)?;
        // Kind follows the destination extension, as with editor uploads.
        if is_text_path(path) {
            return Ok(File::text(path, String::from_utf8_lossy(&data).into_owned()));
        }
        return Ok(File::binary(path, data));
    }
    match text {
        Some(text) => Ok(File::text(path, text)),
        None => Err(CliError::MissingContents),
    }
}

/// Sleep out the pending deadlines in order, rendering and saving as each
/// timer fires. Mirrors the editor's edit -> debounce -> work control flow.
fn drive(project: &mut Project, store: &mut JsonDirStore) -> Result<(), CliError> {
    let mut renderer = Renderer::new(MemoryHost::new());
    while let Some(deadline) = project.queue().next_deadline() {
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        let due = project.queue_mut().poll(Instant::now());
        if due.render {
            let output = renderer.render(project.vfs());
            for warning in &output.warnings {
                eprintln!("warning: {warning}");
            }
        }
        if due.persist {
            store.save(&project.snapshot(now_ms()))?;
        }
    }
    Ok(())
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

fn print_tree(nodes: &[TreeNode], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        match node {
            TreeNode::Folder { name, children, .. } => {
                println!("{indent}{name}/");
                print_tree(children, depth + 1);
            }
            TreeNode::File { name, .. } => println!("{indent}{name}"),
        }
    }
}
