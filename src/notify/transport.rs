//! One-shot notification delivery over a local Unix socket
//!
//! The external consumer owns rendering; this side only connects, writes a
//! single self-contained JSON message, and closes. Delivery is best-effort:
//! the consumer process may simply not be running, so failures are reported
//! to the caller for logging and never treated as fatal.

use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::Notification;

/// Errors from a single delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to connect to notification consumer at {path}: {source}")]
    Connect {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write notification: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to encode notification: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Stateless per-call client for the external notification consumer.
#[derive(Debug, Clone)]
pub struct NotifyTransport {
    socket_path: PathBuf,
}

impl NotifyTransport {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    /// Deliver one notification: connect, write the JSON payload plus a
    /// trailing newline, close.
    pub fn send(&self, notification: &Notification) -> Result<(), TransportError> {
        let mut payload = serde_json::to_string(notification)?;
        payload.push('\n');

        let mut stream =
            UnixStream::connect(&self.socket_path).map_err(|source| TransportError::Connect {
                path: self.socket_path.clone(),
                source,
            })?;
        stream.write_all(payload.as_bytes())?;
        stream.shutdown(std::net::Shutdown::Write)?;

        debug!(
            kind = notification.kind.as_str(),
            priority = notification.priority,
            "Notification delivered"
        );
        Ok(())
    }
}
