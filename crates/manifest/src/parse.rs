//! The manifest codec: a single-pass, line-oriented parser.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::{ManifestError, TreeManifest};

impl TreeManifest {
    /// Reads and parses a manifest file.
    ///
    /// Fails only when the file cannot be read; see [`parse`](Self::parse)
    /// for the lenient handling of the content itself.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let raw = std::fs::read(path)?;
        Ok(Self::parse(raw))
    }

    /// Parses manifest text into a [`TreeManifest`].
    ///
    /// Permissive by design so forward-compatible manifest fields do not
    /// break older parsers: unrecognized lines are ignored, and malformed
    /// field values (bad timestamp, bad count) degrade to their zero
    /// values instead of aborting the parse. The source bytes are
    /// retained on the result for verbatim re-transmission.
    pub fn parse(raw: Vec<u8>) -> Self {
        let mut manifest = TreeManifest {
            protocol_version: String::new(),
            root_name: String::new(),
            generated: DateTime::UNIX_EPOCH,
            total_dirs: 0,
            total_files: 0,
            dirs: Vec::new(),
            files: Vec::new(),
            raw: Vec::new(),
        };

        let text = String::from_utf8_lossy(&raw);
        let mut in_dirs = false;
        let mut in_files = false;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix("PROTOCOL_VERSION:") {
                manifest.protocol_version = rest.to_owned();
            } else if let Some(rest) = line.strip_prefix("ROOT_NAME:") {
                manifest.root_name = rest.to_owned();
            } else if let Some(rest) = line.strip_prefix("GENERATED:") {
                // Malformed timestamps degrade to the zero value.
                manifest.generated = DateTime::parse_from_rfc3339(rest)
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or(DateTime::UNIX_EPOCH);
            } else if let Some(rest) = line.strip_prefix("TOTAL_DIRS:") {
                manifest.total_dirs = rest.trim().parse().unwrap_or(0);
            } else if let Some(rest) = line.strip_prefix("TOTAL_FILES:") {
                manifest.total_files = rest.trim().parse().unwrap_or(0);
            } else if line == "BEGIN_DIRECTORIES" {
                in_dirs = true;
            } else if line == "BEGIN_FILES" {
                in_dirs = false;
                in_files = true;
            } else if line == "END_MANIFEST" {
                in_files = false;
            } else if in_dirs && line.starts_with("DIR:") {
                // DIR:<name>:<extra> — only the first field is the path.
                let mut parts = line.splitn(3, ':');
                parts.next();
                if let Some(name) = parts.next() {
                    manifest.dirs.push(name.to_owned());
                }
            } else if in_files {
                if let Some(rest) = line.strip_prefix("FILE:") {
                    manifest.files.push(rest.to_owned());
                }
            }
        }

        manifest.raw = raw;
        manifest
    }
}
