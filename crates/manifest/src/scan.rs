//! Manifest generation from a directory walk.
//!
//! Output ordering is optimized for network transfer: directories come
//! first sorted by depth then path (so parents are created before their
//! children), files after sorted by path.

use std::io;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use walkdir::WalkDir;

use gamedepot_protocol::PROTOCOL_VERSION;

use crate::ManifestError;

/// Options for scanning a directory tree.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Include entries whose name starts with `.`.
    pub include_hidden: bool,
}

/// Relative paths collected from a directory walk, transfer-ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeScan {
    /// Base name of the scanned directory.
    pub root_name: String,
    /// Directory paths with their depth (0 = directly under the root).
    pub dirs: Vec<(String, usize)>,
    /// File paths relative to the root.
    pub files: Vec<String>,
}

/// Walks `root` and collects relative directory and file paths with
/// forward-slash separators.
pub fn scan_tree(root: &Path, options: &ScanOptions) -> Result<TreeScan, ManifestError> {
    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let include_hidden = options.include_hidden;
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(move |entry| include_hidden || !is_hidden(entry.file_name()));

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let relative = relative.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            dirs.push((relative, entry.depth() - 1));
        } else {
            files.push(relative);
        }
    }

    // Parents before children, stable within a depth level.
    dirs.sort_by(|a, b| (a.1, &a.0).cmp(&(b.1, &b.0)));
    files.sort();

    Ok(TreeScan {
        root_name,
        dirs,
        files,
    })
}

/// Renders a scan in the line-oriented manifest format.
///
/// Declared counts equal the actual list lengths, and the output parses
/// back to the same dir and file sequences.
pub fn render_manifest(scan: &TreeScan) -> String {
    let mut out = String::new();
    out.push_str(&format!("PROTOCOL_VERSION:{PROTOCOL_VERSION}\n"));
    out.push_str(&format!("ROOT_NAME:{}\n", scan.root_name));
    out.push_str(&format!(
        "GENERATED:{}\n",
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    ));
    out.push_str(&format!("TOTAL_DIRS:{}\n", scan.dirs.len()));
    out.push_str(&format!("TOTAL_FILES:{}\n", scan.files.len()));
    out.push_str("BEGIN_DIRECTORIES\n");
    for (path, depth) in &scan.dirs {
        out.push_str(&format!("DIR:{path}:{depth}\n"));
    }
    out.push_str("BEGIN_FILES\n");
    for path in &scan.files {
        out.push_str(&format!("FILE:{path}\n"));
    }
    out.push_str("END_MANIFEST\n");
    out
}

/// Scans `root` and writes the rendered manifest to `out_path`.
///
/// Returns the scan so callers can report what was collected.
pub fn write_manifest(
    root: &Path,
    out_path: &Path,
    options: &ScanOptions,
) -> Result<TreeScan, ManifestError> {
    let scan = scan_tree(root, options)?;
    std::fs::write(out_path, render_manifest(&scan))?;
    Ok(scan)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}
