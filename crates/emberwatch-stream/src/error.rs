//! Error types for the stream client.
//!
//! Channel failures are never fatal: the supervisor logs them and retries
//! after the fixed reconnect delay. The enum exists so the supervisor can
//! distinguish a failed connect attempt from a connection that dropped
//! mid-stream when logging.

/// Errors from a single channel connection attempt.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The `WebSocket` handshake failed.
    #[error("connect failed: {0}")]
    Connect(String),

    /// An established connection errored mid-stream.
    #[error("transport error: {0}")]
    Transport(String),
}
