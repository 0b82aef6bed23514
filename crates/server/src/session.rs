//! Per-connection transfer session.
//!
//! State machine: await identifier, resolve manifest, send metadata,
//! stream files, close. One-shot and fire-and-forget: no acks, no
//! retries, no timeouts, and no error frames — a client that sees the
//! connection close early cannot tell why.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use gamedepot_manifest::TreeManifest;
use gamedepot_protocol::{FileRecord, ManifestBlob, TRANSFER_BUFFER_SIZE};

use crate::SessionError;

/// Handles one client connection.
///
/// Configuration is injected at construction; sessions own their parsed
/// manifest exclusively and share nothing. The identifier read from the
/// client is joined into the repository path without validation, so the
/// repository root must only contain trusted trees.
#[derive(Debug, Clone)]
pub struct TransferSession {
    repo_root: PathBuf,
    manifest_name: String,
}

impl TransferSession {
    pub fn new(repo_root: PathBuf, manifest_name: impl Into<String>) -> Self {
        Self {
            repo_root,
            manifest_name: manifest_name.into(),
        }
    }

    /// Runs the session to completion on `stream`.
    ///
    /// An error return means the session aborted: either the manifest
    /// could not be read (nothing was sent) or a write failed mid-stream
    /// (remaining files were not attempted). Per-file open failures do
    /// not abort; those files are logged and skipped.
    pub async fn run(&self, stream: TcpStream, peer: SocketAddr) -> Result<(), SessionError> {
        info!(%peer, "client connected");
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        // The requested game identifier: one newline-terminated line,
        // trailing newline stripped, no validation.
        let mut line = String::new();
        reader.read_line(&mut line).await?;
        let game = line.strip_suffix('\n').unwrap_or(&line);
        debug!(%peer, game, "identifier received");

        // Resolve and parse the manifest. On failure the connection is
        // dropped with nothing sent; the client cannot distinguish an
        // unknown identifier from a network failure.
        let manifest_path = self.repo_root.join(game).join(&self.manifest_name);
        let raw = match tokio::fs::read(&manifest_path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%peer, path = %manifest_path.display(), "manifest unavailable: {e}");
                return Err(e.into());
            }
        };
        let manifest = TreeManifest::parse(raw);

        let game_dir = self.repo_root.join(game);

        // Stat failures degrade to an empty list rather than dropping the
        // connection; streaming below still runs.
        let records: Vec<FileRecord> = match manifest.file_info(&game_dir) {
            Ok(records) => records,
            Err(e) => {
                warn!(%peer, game, "file info unavailable: {e}");
                Vec::new()
            }
        };

        // Metadata: raw manifest bytes, then the full file record list,
        // both before any file bytes.
        send_json(&mut writer, &ManifestBlob(manifest.raw_bytes().to_vec())).await?;
        send_json(&mut writer, &records).await?;

        // Stream every listed file, in manifest order.
        let mut buf = vec![0u8; TRANSFER_BUFFER_SIZE];
        for path in manifest.files() {
            let file_path = game_dir.join(path);
            let mut file = match File::open(&file_path).await {
                Ok(file) => file,
                Err(e) => {
                    warn!(%peer, path = %file_path.display(), "skipping unreadable file: {e}");
                    continue;
                }
            };

            if let Err(e) = copy_file(&mut file, &mut writer, &mut buf).await {
                // Connection presumed broken: stop, do not attempt the rest.
                warn!(%peer, path = %file_path.display(), "stream aborted: {e}");
                return Err(e.into());
            }
            debug!(%peer, path = %file_path.display(), "file sent");
        }

        info!(%peer, game, "all files sent");
        Ok(())
    }
}

/// Writes one JSON value followed by a newline.
async fn send_json<W, T>(writer: &mut W, value: &T) -> Result<(), SessionError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut payload = serde_json::to_vec(value)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    Ok(())
}

/// Copies the whole of `file` to `writer` through `buf`.
async fn copy_file<R, W>(file: &mut R, writer: &mut W, buf: &mut [u8]) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut total = 0u64;
    loop {
        let n = file.read(buf).await?;
        if n == 0 {
            return Ok(total);
        }
        writer.write_all(&buf[..n]).await?;
        total += n as u64;
    }
}
