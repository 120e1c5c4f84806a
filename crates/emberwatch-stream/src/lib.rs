//! Resilient live-stream channels for the Emberwatch console.
//!
//! Owns one `WebSocket` connection per channel (telemetry, notifications),
//! parses and validates inbound frames, routes them into the entity cache,
//! and forwards notifications to the alert collaborator. Connectivity loss
//! degrades to "stale but present" data: every channel reconnects forever
//! on a fixed delay and is never fatal to the process.
//!
//! # Modules
//!
//! - [`channel`] -- Connection lifecycle state machine and the supervisor
//! - [`client`] -- The two-channel [`StreamClient`] facade
//! - [`route`] -- Frame validation and cache routing
//! - [`alerts`] -- Severity-to-presentation policy and the [`AlertSink`] seam
//! - [`error`] -- Channel error taxonomy
//!
//! [`StreamClient`]: client::StreamClient
//! [`AlertSink`]: alerts::AlertSink

pub mod alerts;
pub mod channel;
pub mod client;
pub mod error;
pub mod route;

pub use alerts::{AlertPresentation, AlertSink, presentation_for};
pub use channel::{ChannelKind, ChannelLifecycle, ChannelState, RECONNECT_DELAY};
pub use client::{StreamClient, StreamConfig};
pub use error::ChannelError;
pub use route::EventRouter;
