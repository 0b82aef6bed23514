//! Wire protocol types and constants for the download protocol.
//!
//! # Wire format (one session per TCP connection)
//!
//! ```text
//! CLIENT -> SERVER: <identifier>\n            (UTF-8 text line)
//! SERVER -> CLIENT: <manifest blob JSON>\n    (base64 string of raw manifest bytes)
//! SERVER -> CLIENT: <file record array JSON>\n ([{"Name":...,"Size":...}, ...])
//! SERVER -> CLIENT: raw file bytes, manifest order, no delimiters
//! ```
//!
//! File bytes carry no length prefix; the client splits the stream using
//! the sizes from the record array. The connection closes after the last
//! file or on the first stream error.

pub mod records;

pub use records::{FileRecord, ManifestBlob};

/// Transfer buffer size for streaming file bytes (4 MiB).
///
/// Sized for throughput over many small reads.
pub const TRANSFER_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Default TCP port for the download protocol.
pub const DEFAULT_TCP_PORT: u16 = 5050;

/// Default port for the HTTP route layer.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default manifest filename inside each game directory.
pub const DEFAULT_MANIFEST_NAME: &str = "manifest.protocol";

/// Format revision written by the manifest scanner.
pub const PROTOCOL_VERSION: &str = "1.0";
