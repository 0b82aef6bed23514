//! Tree manifest parsing, queries and generation.
//!
//! A manifest is a line-oriented text file describing a directory tree:
//!
//! ```text
//! PROTOCOL_VERSION:1.0
//! ROOT_NAME:MyGame
//! GENERATED:2024-06-01T12:00:00.000000Z
//! TOTAL_DIRS:1
//! TOTAL_FILES:2
//! BEGIN_DIRECTORIES
//! DIR:data:0
//! BEGIN_FILES
//! FILE:a.txt
//! FILE:data/b.txt
//! END_MANIFEST
//! ```
//!
//! The file list's order is authoritative: it defines the transfer order
//! and the ordering searched by suffix lookups. [`scan`] generates
//! manifests from a directory walk; [`TreeManifest`] is the parsed,
//! queryable model.

mod parse;
pub mod scan;
mod tree;

pub use scan::{ScanOptions, TreeScan, render_manifest, scan_tree, write_manifest};
pub use tree::TreeManifest;

/// Errors produced by manifest parsing and tree queries.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not listed in manifest: {0}")]
    UnknownFile(String),
}
