//! The parsed tree model and its query operations.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use gamedepot_protocol::FileRecord;

use crate::ManifestError;

/// A parsed tree manifest.
///
/// Immutable after parse, except for [`rename_root`](Self::rename_root)
/// (an administrative override that does not touch the dir or file
/// lists). The listed file order is authoritative: metadata sent to a
/// client and the streamed bytes enumerate files in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeManifest {
    pub(crate) protocol_version: String,
    pub(crate) root_name: String,
    pub(crate) generated: DateTime<Utc>,
    pub(crate) total_dirs: u64,
    pub(crate) total_files: u64,
    pub(crate) dirs: Vec<String>,
    pub(crate) files: Vec<String>,
    pub(crate) raw: Vec<u8>,
}

impl TreeManifest {
    /// Format revision tag, verbatim from the `PROTOCOL_VERSION:` line.
    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }

    /// Logical name of the tree's root.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Manifest creation timestamp. The Unix epoch when the `GENERATED:`
    /// line was absent or malformed.
    pub fn generated(&self) -> DateTime<Utc> {
        self.generated
    }

    /// Declared directory count. Advisory only; never validated against
    /// the actual list length.
    pub fn total_dirs(&self) -> u64 {
        self.total_dirs
    }

    /// Declared file count. Advisory only, like [`total_dirs`](Self::total_dirs).
    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    /// Directory paths relative to the root, in manifest order.
    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    /// File paths relative to the root, in transfer order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The exact bytes this manifest was parsed from, for verbatim
    /// forwarding instead of re-serialization.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the contiguous suffix of the file list starting at the
    /// first occurrence of `name`, inclusive.
    pub fn files_from(&self, name: &str) -> Result<&[String], ManifestError> {
        match self.files.iter().position(|f| f == name) {
            Some(i) => Ok(&self.files[i..]),
            None => Err(ManifestError::UnknownFile(name.to_owned())),
        }
    }

    /// Stats every listed file against `root` and returns `{name, size}`
    /// records in transfer order.
    ///
    /// Fails on the first unreadable path, discarding partial results.
    pub fn file_info(&self, root: &Path) -> Result<Vec<FileRecord>, ManifestError> {
        stat_files(&self.files, root)
    }

    /// Like [`file_info`](Self::file_info), restricted to the suffix
    /// starting at `name` (see [`files_from`](Self::files_from)).
    pub fn file_info_from(&self, root: &Path, name: &str) -> Result<Vec<FileRecord>, ManifestError> {
        let suffix = self.files_from(name)?;
        stat_files(suffix, root)
    }

    /// Creates every listed directory (and missing parents) under
    /// `target`, optionally nested one level under the root name.
    ///
    /// Idempotent: existing directories are not an error.
    pub fn create_dirs(&self, target: &Path, include_root: bool) -> Result<(), ManifestError> {
        let base = if include_root {
            target.join(&self.root_name)
        } else {
            target.to_path_buf()
        };
        for dir in &self.dirs {
            fs::create_dir_all(base.join(dir))?;
        }
        Ok(())
    }

    /// Administrative override of the root name. Dir and file lists are
    /// untouched.
    pub fn rename_root(&mut self, new_name: impl Into<String>) {
        self.root_name = new_name.into();
    }
}

fn stat_files(files: &[String], root: &Path) -> Result<Vec<FileRecord>, ManifestError> {
    let mut records = Vec::with_capacity(files.len());
    for path in files {
        let meta = fs::metadata(root.join(path))?;
        records.push(FileRecord {
            name: base_name(path).to_owned(),
            size: meta.len() as i64,
        });
    }
    Ok(records)
}

/// Last path segment of a forward-slash relative path.
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
