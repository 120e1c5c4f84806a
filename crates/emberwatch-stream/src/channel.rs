//! Per-channel connection lifecycle and the reconnecting supervisor.
//!
//! Each channel owns exactly one logical connection. The lifecycle is the
//! three-state machine `Disconnected -> Connecting -> Connected`, guarded so
//! a second connect attempt cannot start while one is in flight or a
//! connection is live. On close or error the supervisor returns the channel
//! to `Disconnected` and retries after a fixed delay, forever — connectivity
//! loss is never fatal.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::error::ChannelError;
use crate::route::EventRouter;

/// Fixed delay between reconnect attempts. No exponential growth, no cap.
pub const RECONNECT_DELAY: std::time::Duration = std::time::Duration::from_secs(3);

/// The two independent live channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelKind {
    /// Fire and drone telemetry frames.
    Telemetry,
    /// Operational notification frames.
    Notifications,
}

impl ChannelKind {
    /// Channel name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Telemetry => "telemetry",
            Self::Notifications => "notifications",
        }
    }
}

/// Connection state of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelState {
    /// No connection and no attempt in flight.
    #[default]
    Disconnected,
    /// A handshake is in flight.
    Connecting,
    /// A connection is live.
    Connected,
}

/// Tracks one channel's connection state and enforces the
/// single-connection guarantee.
///
/// State changes go through the methods here; `begin_connect` is the guard
/// that admits at most one attempt at a time, however rapidly it is called.
/// Observers subscribe to the state as a transient connectivity indicator —
/// it is never surfaced as an error.
#[derive(Debug)]
pub struct ChannelLifecycle {
    state: watch::Sender<ChannelState>,
}

impl ChannelLifecycle {
    /// Create a lifecycle in the `Disconnected` state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(ChannelState::Disconnected);
        Self { state }
    }

    /// Current state.
    pub fn state(&self) -> ChannelState {
        *self.state.borrow()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ChannelState> {
        self.state.subscribe()
    }

    /// Attempt `Disconnected -> Connecting`.
    ///
    /// Returns `false` — changing nothing — while an attempt is already in
    /// flight or a connection is live.
    pub fn begin_connect(&self) -> bool {
        let mut admitted = false;
        self.state.send_if_modified(|state| {
            if *state == ChannelState::Disconnected {
                *state = ChannelState::Connecting;
                admitted = true;
                true
            } else {
                false
            }
        });
        admitted
    }

    /// Record a successful handshake: `Connecting -> Connected`.
    pub fn mark_connected(&self) {
        self.state.send_if_modified(|state| {
            if *state == ChannelState::Connecting {
                *state = ChannelState::Connected;
                true
            } else {
                false
            }
        });
    }

    /// Return to `Disconnected` from any state, releasing the guard.
    pub fn mark_disconnected(&self) {
        self.state.send_if_modified(|state| {
            if *state == ChannelState::Disconnected {
                false
            } else {
                *state = ChannelState::Disconnected;
                true
            }
        });
    }
}

impl Default for ChannelLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Supervise one channel forever: connect, pump frames, reconnect on loss.
///
/// Aborting the task that runs this future is the teardown path: it drops
/// any live socket (closing the connection) and cancels any pending
/// reconnect sleep. The caller resets the lifecycle afterwards.
pub(crate) async fn run_channel(
    kind: ChannelKind,
    url: String,
    lifecycle: Arc<ChannelLifecycle>,
    router: Arc<EventRouter>,
) {
    loop {
        if !lifecycle.begin_connect() {
            // Another connection is live or in flight; never stack a second.
            tokio::time::sleep(RECONNECT_DELAY).await;
            continue;
        }

        match connect_async(url.as_str()).await {
            Ok((mut socket, _response)) => {
                lifecycle.mark_connected();
                info!(channel = kind.as_str(), url = %url, "channel connected");
                match pump(kind, &mut socket, router.as_ref()).await {
                    Ok(()) => info!(channel = kind.as_str(), "channel closed by peer"),
                    Err(error) => warn!(channel = kind.as_str(), %error, "channel dropped"),
                }
            }
            Err(error) => {
                let error = ChannelError::Connect(error.to_string());
                warn!(channel = kind.as_str(), %error, "channel connect failed");
            }
        }

        lifecycle.mark_disconnected();
        debug!(
            channel = kind.as_str(),
            delay = ?RECONNECT_DELAY,
            "scheduling reconnect"
        );
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

/// Pump frames off an established connection until it closes or errors.
///
/// Frames are processed in arrival order. Text frames route by channel
/// kind; pings are answered; everything else is ignored.
async fn pump(kind: ChannelKind, socket: &mut Socket, router: &EventRouter) -> Result<(), ChannelError> {
    while let Some(message) = socket.next().await {
        match message {
            Ok(Message::Text(text)) => match kind {
                ChannelKind::Telemetry => router.route_telemetry(text.as_str()).await,
                ChannelKind::Notifications => router.route_notification(text.as_str()).await,
            },
            Ok(Message::Ping(payload)) => {
                socket
                    .send(Message::Pong(payload))
                    .await
                    .map_err(|error| ChannelError::Transport(error.to_string()))?;
            }
            Ok(Message::Close(_)) => return Ok(()),
            Ok(_) => {
                // Binary and pong frames carry nothing for us.
            }
            Err(error) => return Err(ChannelError::Transport(error.to_string())),
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn guard_admits_the_first_attempt_only() {
        let lifecycle = ChannelLifecycle::new();
        assert!(lifecycle.begin_connect());
        assert_eq!(lifecycle.state(), ChannelState::Connecting);
        assert!(!lifecycle.begin_connect());
    }

    #[test]
    fn guard_blocks_while_connected() {
        let lifecycle = ChannelLifecycle::new();
        assert!(lifecycle.begin_connect());
        lifecycle.mark_connected();
        assert_eq!(lifecycle.state(), ChannelState::Connected);
        assert!(!lifecycle.begin_connect());
    }

    #[test]
    fn disconnect_releases_the_guard() {
        let lifecycle = ChannelLifecycle::new();
        assert!(lifecycle.begin_connect());
        lifecycle.mark_connected();
        lifecycle.mark_disconnected();
        assert_eq!(lifecycle.state(), ChannelState::Disconnected);
        assert!(lifecycle.begin_connect());
    }

    #[test]
    fn rapid_repeated_connects_admit_exactly_one() {
        let lifecycle = ChannelLifecycle::new();
        let admitted = (0..100).filter(|_| lifecycle.begin_connect()).count();
        assert_eq!(admitted, 1);
    }

    #[test]
    fn mark_connected_requires_an_attempt_in_flight() {
        let lifecycle = ChannelLifecycle::new();
        // No begin_connect: a stray completion must not fabricate a
        // connection.
        lifecycle.mark_connected();
        assert_eq!(lifecycle.state(), ChannelState::Disconnected);
    }

    #[test]
    fn state_transitions_are_observable() {
        let lifecycle = ChannelLifecycle::new();
        let watcher = lifecycle.subscribe();
        assert_eq!(*watcher.borrow(), ChannelState::Disconnected);
        lifecycle.begin_connect();
        assert_eq!(*watcher.borrow(), ChannelState::Connecting);
        lifecycle.mark_connected();
        assert_eq!(*watcher.borrow(), ChannelState::Connected);
    }
}
