//! TCP accept loop.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::ServerError;
use crate::session::TransferSession;

/// Download server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on (0 = OS-assigned).
    pub port: u16,
    /// Repository root containing one directory per game.
    pub repo_root: PathBuf,
    /// Manifest filename looked up inside each game directory.
    pub manifest_name: String,
}

/// The TCP download server.
///
/// Spawns one independent [`TransferSession`] per accepted connection,
/// unbounded. Accept failures are logged and looped past; only a bind
/// failure terminates [`run`](Self::run) with an error.
pub struct DownloadServer {
    config: ServerConfig,
    cancel: CancellationToken,
    local_addr: Mutex<Option<SocketAddr>>,
}

impl DownloadServer {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            cancel: CancellationToken::new(),
            local_addr: Mutex::new(None),
        })
    }

    /// Returns the local address the server is listening on.
    ///
    /// Only available after [`run`](Self::run) binds the socket.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock().await
    }

    /// Returns the listening port (0 if not yet bound).
    pub async fn port(&self) -> u16 {
        self.local_addr.lock().await.map(|a| a.port()).unwrap_or(0)
    }

    /// Gracefully shuts down the accept loop.
    ///
    /// Sessions already in flight run to completion on their own tasks.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Runs the server until cancellation. Bind failure is fatal.
    pub async fn run(self: &Arc<Self>) -> Result<(), ServerError> {
        let addr: SocketAddr = ([0, 0, 0, 0], self.config.port).into();
        let listener = TcpListener::bind(addr).await?;

        let local_addr = listener.local_addr()?;
        *self.local_addr.lock().await = Some(local_addr);
        info!(%local_addr, repo = %self.config.repo_root.display(), "download server listening");

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("download server shutting down");
                    break Ok(());
                }

                result = listener.accept() => {
                    match result {
                        Ok((stream, peer_addr)) => {
                            let session = TransferSession::new(
                                self.config.repo_root.clone(),
                                self.config.manifest_name.clone(),
                            );
                            tokio::spawn(async move {
                                if let Err(e) = session.run(stream, peer_addr).await {
                                    warn!(%peer_addr, "session ended with error: {e}");
                                }
                            });
                        }
                        Err(e) => {
                            error!("accept error: {e}");
                        }
                    }
                }
            }
        }
    }
}
