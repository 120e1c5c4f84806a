//! Routing of inbound frames into the entity cache.
//!
//! The router is the validation boundary: a frame that fails to parse, or
//! whose payload is missing identity fields, is dropped silently (debug log
//! only) — it never crashes a channel and never reaches the cache. Valid
//! telemetry merges under its kind and publishes the new latest timestamp;
//! valid notifications merge and are forwarded to the alert collaborator.

use std::sync::Arc;

use emberwatch_core::cache::{AckPolicy, SharedCache};
use emberwatch_types::{Notification, TelemetryFrame};
use tokio::sync::watch;
use tracing::debug;

use crate::alerts::{AlertSink, presentation_for};

/// Routes validated stream events into the cache and the alert surface.
///
/// The router never mutates the cache directly beyond the merge contract;
/// the normalizer's dedupe makes routing idempotent under duplicate
/// delivery.
pub struct EventRouter {
    cache: SharedCache,
    alerts: Arc<dyn AlertSink>,
    ack_policy: AckPolicy,
    latest_tx: watch::Sender<i64>,
}

impl EventRouter {
    /// Create a router merging into `cache` and alerting through `alerts`.
    pub fn new(cache: SharedCache, alerts: Arc<dyn AlertSink>, ack_policy: AckPolicy) -> Self {
        let (latest_tx, _) = watch::channel(0);
        Self {
            cache,
            alerts,
            ack_policy,
            latest_tx,
        }
    }

    /// Watch the newest telemetry instant observed across both kinds.
    ///
    /// The value starts at 0 and only ever increases; the timeline session
    /// uses it to drive window advancement.
    pub fn subscribe_latest(&self) -> watch::Receiver<i64> {
        self.latest_tx.subscribe()
    }

    /// Handle one inbound telemetry frame.
    ///
    /// Well-formed frames are merged into the cache under their kind.
    /// Anything else is dropped without error.
    pub async fn route_telemetry(&self, raw: &str) {
        let frame: TelemetryFrame = match serde_json::from_str(raw) {
            Ok(frame) => frame,
            Err(error) => {
                debug!(%error, "discarding malformed telemetry frame");
                return;
            }
        };
        debug!(
            kind = frame.kind().as_str(),
            id = frame.record_id(),
            timestamp = frame.timestamp_ms(),
            "telemetry frame accepted"
        );

        let latest = {
            let mut cache = self.cache.write().await;
            match frame {
                TelemetryFrame::Fire(record) => cache.merge_fire(record),
                TelemetryFrame::Drone(record) => cache.merge_drone(record),
            }
            cache.latest_timestamp()
        };

        if let Some(latest) = latest {
            self.publish_latest(latest);
        }
    }

    /// Handle one inbound notification frame.
    ///
    /// Well-formed notifications are merged (subject to the router's
    /// acknowledgement policy) and then forwarded to the alert surface with
    /// their severity-derived presentation. Anything else is dropped
    /// without error.
    pub async fn route_notification(&self, raw: &str) {
        let notification: Notification = match serde_json::from_str(raw) {
            Ok(notification) => notification,
            Err(error) => {
                debug!(%error, "discarding malformed notification frame");
                return;
            }
        };

        {
            let mut cache = self.cache.write().await;
            cache.merge_notification(notification.clone(), self.ack_policy);
        }

        self.alerts
            .present(&notification, presentation_for(notification.severity));
    }

    /// Publish a newly observed telemetry instant if it moves time forward.
    fn publish_latest(&self, latest: i64) {
        self.latest_tx.send_if_modified(|current| {
            if latest > *current {
                *current = latest;
                true
            } else {
                false
            }
        });
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("ack_policy", &self.ack_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use emberwatch_core::cache;
    use emberwatch_types::Severity;

    use crate::alerts::AlertPresentation;

    use super::*;

    /// Records every presented alert for assertions.
    #[derive(Default)]
    struct RecordingSink {
        presented: Mutex<Vec<(String, AlertPresentation)>>,
    }

    impl AlertSink for RecordingSink {
        fn present(&self, notification: &Notification, presentation: AlertPresentation) {
            if let Ok(mut presented) = self.presented.lock() {
                presented.push((notification.id.clone(), presentation));
            }
        }
    }

    fn router() -> (EventRouter, SharedCache, Arc<RecordingSink>) {
        let cache = cache::shared();
        let sink = Arc::new(RecordingSink::default());
        let router = EventRouter::new(
            Arc::clone(&cache),
            Arc::clone(&sink) as Arc<dyn AlertSink>,
            AckPolicy::PreserveAcknowledged,
        );
        (router, cache, sink)
    }

    fn fire_frame(id: &str, timestamp: i64) -> String {
        format!(
            r#"{{"type":"fire","payload":{{"id":"{id}","lat":34.1,"lng":-118.4,"intensity":50,"size":40,"status":"Active","timestamp":{timestamp}}}}}"#
        )
    }

    #[tokio::test]
    async fn valid_telemetry_reaches_the_cache_once() {
        let (router, cache, _) = router();
        router.route_telemetry(&fire_frame("F-1", 100)).await;
        router.route_telemetry(&fire_frame("F-1", 100)).await;
        assert_eq!(cache.read().await.fires().len(), 1);
    }

    #[tokio::test]
    async fn malformed_telemetry_is_dropped_silently() {
        let (router, cache, _) = router();
        router.route_telemetry("not json at all").await;
        router.route_telemetry(r#"{"type":"helicopter","payload":{}}"#).await;
        router
            .route_telemetry(r#"{"type":"fire","payload":{"lat":1.0}}"#)
            .await;
        assert!(cache.read().await.fires().is_empty());
    }

    #[tokio::test]
    async fn telemetry_publishes_the_latest_instant() {
        let (router, _, _) = router();
        let latest = router.subscribe_latest();
        router.route_telemetry(&fire_frame("F-1", 500)).await;
        assert_eq!(*latest.borrow(), 500);

        // An older record merges but never moves time backward.
        router.route_telemetry(&fire_frame("F-2", 300)).await;
        assert_eq!(*latest.borrow(), 500);
    }

    #[tokio::test]
    async fn valid_notification_merges_and_alerts() {
        let (router, cache, sink) = router();
        let raw = r#"{
            "id": "N-1",
            "severity": "critical",
            "title": "Fire rapidly expanding in Sector C-2",
            "message": "Wind speeds have increased.",
            "timestamp": 1700000000000,
            "source": "Fire Detection System"
        }"#;
        router.route_notification(raw).await;

        assert_eq!(cache.read().await.notifications().len(), 1);
        let presented = sink.presented.lock().unwrap();
        assert_eq!(presented.len(), 1);
        assert_eq!(
            presented.first().unwrap(),
            &("N-1".to_owned(), AlertPresentation::Persist)
        );
    }

    #[tokio::test]
    async fn notification_missing_identity_is_dropped() {
        let (router, cache, sink) = router();
        router
            .route_notification(r#"{"severity":"low","title":"x","message":"y","source":"z"}"#)
            .await;
        assert!(cache.read().await.notifications().is_empty());
        assert!(sink.presented.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_severity_still_routes_with_neutral_presentation() {
        let (router, cache, sink) = router();
        let raw = r#"{
            "id": "N-9",
            "severity": "catastrophic",
            "title": "x",
            "message": "y",
            "timestamp": 1,
            "source": "z"
        }"#;
        router.route_notification(raw).await;

        let cached = cache.read().await;
        assert_eq!(
            cached.notifications().first().map(|n| n.severity),
            Some(Severity::Info)
        );
        let presented = sink.presented.lock().unwrap();
        assert_eq!(
            presented.first().map(|(_, p)| *p),
            Some(AlertPresentation::Expire(std::time::Duration::from_secs(5)))
        );
    }
}
