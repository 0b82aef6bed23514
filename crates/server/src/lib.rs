//! TCP download server.
//!
//! One [`TransferSession`] per accepted connection, fully isolated: no
//! shared mutable state, no cross-session cache, no connection limit.
//! Each session re-parses its manifest independently.

mod listener;
mod session;

pub use listener::{DownloadServer, ServerConfig};
pub use session::TransferSession;

/// Errors that terminate the accept loop.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that end a single session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
