//! The stream client: one supervised connection per channel.
//!
//! Spawning the client starts both channel supervisors; dropping it (or
//! calling [`StreamClient::shutdown`]) tears both down synchronously —
//! live sockets close, pending reconnect sleeps are cancelled, and the
//! connection guards are released so a fresh client can reattach
//! immediately.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::channel::{ChannelKind, ChannelLifecycle, ChannelState, run_channel};
use crate::route::EventRouter;

/// Endpoints for the two live channels.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// `WebSocket` URL of the telemetry channel.
    pub telemetry_url: String,
    /// `WebSocket` URL of the notifications channel.
    pub notifications_url: String,
}

/// One channel's supervisor task and its observable lifecycle.
struct ChannelHandle {
    lifecycle: Arc<ChannelLifecycle>,
    task: JoinHandle<()>,
}

/// Owner of the two live channel connections.
pub struct StreamClient {
    telemetry: ChannelHandle,
    notifications: ChannelHandle,
}

impl StreamClient {
    /// Start both channel supervisors.
    ///
    /// Both channels route through the same `router`, so every well-formed
    /// event is applied to the cache exactly once (the normalizer's dedupe
    /// covers duplicate delivery).
    pub fn spawn(config: StreamConfig, router: Arc<EventRouter>) -> Self {
        info!(
            telemetry_url = %config.telemetry_url,
            notifications_url = %config.notifications_url,
            "starting stream client"
        );
        Self {
            telemetry: Self::spawn_channel(
                ChannelKind::Telemetry,
                config.telemetry_url,
                Arc::clone(&router),
            ),
            notifications: Self::spawn_channel(
                ChannelKind::Notifications,
                config.notifications_url,
                router,
            ),
        }
    }

    fn spawn_channel(kind: ChannelKind, url: String, router: Arc<EventRouter>) -> ChannelHandle {
        let lifecycle = Arc::new(ChannelLifecycle::new());
        let task = tokio::spawn(run_channel(kind, url, Arc::clone(&lifecycle), router));
        ChannelHandle { lifecycle, task }
    }

    const fn handle(&self, kind: ChannelKind) -> &ChannelHandle {
        match kind {
            ChannelKind::Telemetry => &self.telemetry,
            ChannelKind::Notifications => &self.notifications,
        }
    }

    /// Current connection state of a channel.
    pub fn channel_state(&self, kind: ChannelKind) -> ChannelState {
        self.handle(kind).lifecycle.state()
    }

    /// Watch a channel's connection state (the connectivity indicator).
    pub fn subscribe_state(&self, kind: ChannelKind) -> watch::Receiver<ChannelState> {
        self.handle(kind).lifecycle.subscribe()
    }

    /// Tear both channels down.
    ///
    /// Aborting the supervisors drops any live socket and cancels any
    /// pending reconnect sleep; resetting the lifecycles releases the
    /// connection guards. No reconnect fires afterwards.
    pub fn shutdown(&self) {
        info!("stream client shutting down");
        self.telemetry.task.abort();
        self.notifications.task.abort();
        self.telemetry.lifecycle.mark_disconnected();
        self.notifications.lifecycle.mark_disconnected();
    }
}

impl Drop for StreamClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for StreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamClient")
            .field("telemetry", &self.telemetry.lifecycle.state())
            .field("notifications", &self.notifications.lifecycle.state())
            .finish()
    }
}
