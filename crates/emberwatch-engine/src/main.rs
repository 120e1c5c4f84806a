//! Mission console engine entry point for Emberwatch.
//!
//! Wires the reconciliation engine together: warms the entity cache from
//! the historical API, attaches the two live stream channels, and runs the
//! timeline session that reconstructs and renders scenes.
//!
//! # Architecture
//!
//! ```text
//! HTTP (bootstrap) ─┐
//!                   ├─> Entity Cache ─> Snapshot ─> SceneSink
//! WS (telemetry) ───┤        │
//! WS (notifications)┘        └─ latest instant ─> Window/Playback
//! ```
//!
//! Connectivity loss never stops the process: channels reconnect forever
//! and the console degrades to stale-but-present data.

mod config;
mod error;
mod session;
mod sinks;

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use emberwatch_core::cache::{self, AckPolicy};
use emberwatch_query::ApiClient;
use emberwatch_stream::{EventRouter, StreamClient, StreamConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::EngineConfig;
use crate::session::TimelineSession;
use crate::sinks::{LogAlertSink, LogSceneSink};

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// bootstraps the cache, starts the stream client and timeline session,
/// and runs until interrupted.
///
/// # Errors
///
/// Returns an error if configuration is invalid or signal handling fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("emberwatch-engine starting");

    let config = EngineConfig::from_env().context("failed to load configuration")?;
    info!(
        api_url = %config.api_url,
        telemetry_ws_url = %config.telemetry_ws_url,
        notifications_ws_url = %config.notifications_ws_url,
        playback_speed = config.playback_speed.label(),
        autoplay = config.autoplay,
        "configuration loaded"
    );

    let cache = cache::shared();
    let api = ApiClient::new(&config.api_url);

    // Warm the cache with the last 24 h. A failed bootstrap degrades to an
    // empty console that fills from the live streams.
    match api.fetch_recent_history().await {
        Ok(history) => {
            info!(
                fires = history.fires.len(),
                drones = history.drones.len(),
                "cache bootstrapped from recent history"
            );
            cache.write().await.merge_history(history.fires, history.drones);
        }
        Err(error) => warn!(%error, "recent history fetch failed; starting empty"),
    }
    match api.fetch_recent_notifications().await {
        Ok(notifications) => {
            info!(count = notifications.len(), "notifications bootstrapped");
            let mut guard = cache.write().await;
            for notification in notifications {
                guard.merge_notification(notification, AckPolicy::PreserveAcknowledged);
            }
        }
        Err(error) => warn!(%error, "recent notifications fetch failed; starting empty"),
    }

    // Attach the live channels.
    let router = Arc::new(EventRouter::new(
        Arc::clone(&cache),
        Arc::new(LogAlertSink),
        AckPolicy::PreserveAcknowledged,
    ));
    let latest_rx = router.subscribe_latest();
    let stream = StreamClient::spawn(
        StreamConfig {
            telemetry_url: config.telemetry_ws_url.clone(),
            notifications_url: config.notifications_ws_url.clone(),
        },
        Arc::clone(&router),
    );

    // Connectivity indicator: channel state transitions are logged, never
    // surfaced as errors.
    for kind in [
        emberwatch_stream::ChannelKind::Telemetry,
        emberwatch_stream::ChannelKind::Notifications,
    ] {
        let mut state_rx = stream.subscribe_state(kind);
        tokio::spawn(async move {
            while state_rx.changed().await.is_ok() {
                let state = *state_rx.borrow_and_update();
                info!(channel = kind.as_str(), state = ?state, "channel state");
            }
        });
    }

    // The window ends at the newest bootstrapped instant, or "now" when the
    // cache starts empty.
    let initial_end = cache
        .read()
        .await
        .latest_timestamp()
        .unwrap_or_else(|| Utc::now().timestamp_millis());

    let mut timeline = TimelineSession::new(
        Arc::clone(&cache),
        latest_rx,
        Box::new(LogSceneSink),
        initial_end,
        config.playback_speed,
    );
    if config.autoplay {
        timeline.start_replay();
    }
    let session_task = tokio::spawn(timeline.run());

    info!("engine running; press ctrl-c to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown signal received");

    // Teardown: close both channels (cancelling pending reconnects) and
    // stop the playback timer so no tick fires after this point.
    stream.shutdown();
    session_task.abort();

    Ok(())
}
