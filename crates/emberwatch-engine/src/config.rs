//! Configuration for the engine binary.
//!
//! All configuration is loaded from environment variables. Defaults point
//! at a local mission control service, so a bare `emberwatch-engine` run
//! works against the development stack.

use emberwatch_core::playback::PlaybackSpeed;

use crate::error::EngineError;

/// Complete engine configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the mission control HTTP API.
    pub api_url: String,
    /// `WebSocket` URL of the telemetry channel.
    pub telemetry_ws_url: String,
    /// `WebSocket` URL of the notifications channel.
    pub notifications_ws_url: String,
    /// Playback rate multiplier for the timeline session.
    pub playback_speed: PlaybackSpeed,
    /// Whether the session starts a playback pass over the bootstrapped
    /// window instead of waiting pinned at the live edge.
    pub autoplay: bool,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `EMBERWATCH_API_URL` -- HTTP API base (default `http://127.0.0.1:8000/api`)
    /// - `EMBERWATCH_TELEMETRY_WS_URL` -- telemetry channel
    ///   (default `ws://127.0.0.1:8000/ws/fire-updates/`)
    /// - `EMBERWATCH_NOTIFICATIONS_WS_URL` -- notifications channel
    ///   (default `ws://127.0.0.1:8000/ws/notifications/`)
    /// - `EMBERWATCH_PLAYBACK_SPEED` -- one of `0.5`, `1`, `2`, `5`, `10`
    ///   (default `1`)
    /// - `EMBERWATCH_AUTOPLAY` -- `true`/`false` (default `false`)
    pub fn from_env() -> Result<Self, EngineError> {
        let api_url = env_or("EMBERWATCH_API_URL", "http://127.0.0.1:8000/api");
        let telemetry_ws_url = env_or(
            "EMBERWATCH_TELEMETRY_WS_URL",
            "ws://127.0.0.1:8000/ws/fire-updates/",
        );
        let notifications_ws_url = env_or(
            "EMBERWATCH_NOTIFICATIONS_WS_URL",
            "ws://127.0.0.1:8000/ws/notifications/",
        );

        let playback_speed: PlaybackSpeed = env_or("EMBERWATCH_PLAYBACK_SPEED", "1")
            .parse()
            .map_err(|error| {
                EngineError::Config(format!("invalid EMBERWATCH_PLAYBACK_SPEED: {error}"))
            })?;

        let autoplay: bool = env_or("EMBERWATCH_AUTOPLAY", "false")
            .parse()
            .map_err(|error| {
                EngineError::Config(format!("invalid EMBERWATCH_AUTOPLAY: {error}"))
            })?;

        Ok(Self {
            api_url,
            telemetry_ws_url,
            notifications_ws_url,
            playback_speed,
            autoplay,
        })
    }
}

/// Read an environment variable, falling back to a default.
fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}
