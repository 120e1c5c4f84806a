//! Structured-log implementations of the rendering and alert collaborators.
//!
//! The real console renders scenes on a map and raises toasts; the engine
//! binary runs headless, so both collaborators log instead. Anything that
//! can draw can replace these by implementing the same traits.

use emberwatch_core::snapshot::{Scene, SceneSink};
use emberwatch_stream::alerts::{AlertPresentation, AlertSink};
use emberwatch_types::Notification;
use tracing::{debug, info, warn};

/// Renders scenes as debug log lines.
#[derive(Debug, Default)]
pub struct LogSceneSink;

impl SceneSink for LogSceneSink {
    fn render(&mut self, scene: &Scene) {
        debug!(
            at = scene.at,
            fires = scene.fires.len(),
            drones = scene.drones.len(),
            "scene"
        );
    }
}

/// Presents alerts as log lines, level-matched to their presentation.
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn present(&self, notification: &Notification, presentation: AlertPresentation) {
        match presentation {
            AlertPresentation::Persist => warn!(
                id = %notification.id,
                severity = notification.severity.as_str(),
                source = %notification.source,
                title = %notification.title,
                "alert (persists until dismissed)"
            ),
            AlertPresentation::Expire(after) => info!(
                id = %notification.id,
                severity = notification.severity.as_str(),
                source = %notification.source,
                title = %notification.title,
                expires_in = ?after,
                "alert"
            ),
        }
    }
}
