//! Reconciliation and windowed-playback engine for the Emberwatch console.
//!
//! This crate owns the client-side record of the world: deduplicated,
//! time-ordered telemetry history and the notification set, plus the
//! timeline machinery that replays it.
//!
//! # Modules
//!
//! - [`normalize`] -- Batch deduplication and ordering (pure, idempotent)
//! - [`cache`] -- The merged entity cache, the single shared mutable resource
//! - [`snapshot`] -- "State as of T" reconstruction for rendering
//! - [`window`] -- The moving 24 h window with pin/unpin cursor semantics
//! - [`playback`] -- The cursor scheduler that animates through the window

pub mod cache;
pub mod normalize;
pub mod playback;
pub mod snapshot;
pub mod window;

pub use cache::{AckPolicy, EntityCache, SharedCache};
pub use normalize::{normalize, normalize_notifications};
pub use playback::{
    PlaybackError, PlaybackScheduler, PlaybackSpeed, PlaybackState, TICK_INTERVAL,
};
pub use snapshot::{Scene, SceneSink, snapshot_at};
pub use window::{
    PIN_THRESHOLD_MS, TimeWindow, WINDOW_DURATION_MS, WindowAdvance, WindowController,
};
