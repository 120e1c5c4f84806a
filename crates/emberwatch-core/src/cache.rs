//! The merged client-side record of the world.
//!
//! The cache exclusively owns three collections — fire history, drone
//! history, and the notification set — each maintained through the
//! normalizer on every merge. All mutation flows through the operations
//! here; no other component writes the collections directly.
//!
//! Merging replaces a collection in one synchronous step, so under the
//! shared [`SharedCache`] lock a reader observes either the pre- or the
//! post-merge state, never a partially updated collection.

use std::sync::Arc;

use emberwatch_types::{DroneRecord, FireRecord, Notification};
use tokio::sync::RwLock;
use tracing::debug;

use crate::normalize::{normalize, normalize_notifications};

/// How a notification merge treats a previously acknowledged entry.
///
/// The upstream feed re-sends notifications wholesale, which would silently
/// clear an operator's acknowledgement on every re-delivery. That is almost
/// certainly unintended, so the choice is explicit at the merge call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AckPolicy {
    /// Keep `acknowledged = true` from the cached entry when the incoming
    /// copy carries the same id. This is what the engine wires.
    #[default]
    PreserveAcknowledged,
    /// Replace the cached entry wholesale, acknowledgement included
    /// (the upstream source's original behavior).
    Overwrite,
}

/// The merged telemetry history and notification set.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    /// Fire observations, ascending by `(timestamp, id)`.
    fires: Vec<FireRecord>,
    /// Drone observations, ascending by `(timestamp, id)`.
    drones: Vec<DroneRecord>,
    /// Notifications, ascending by timestamp, one entry per id.
    notifications: Vec<Notification>,
}

impl EntityCache {
    /// Create an empty cache.
    pub const fn new() -> Self {
        Self {
            fires: Vec::new(),
            drones: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Merge one fire observation into the fire history.
    pub fn merge_fire(&mut self, record: FireRecord) {
        debug!(id = %record.id, timestamp = record.timestamp, "merging fire record");
        self.fires.push(record);
        self.fires = normalize(std::mem::take(&mut self.fires));
    }

    /// Merge one drone observation into the drone history.
    pub fn merge_drone(&mut self, record: DroneRecord) {
        debug!(id = %record.id, timestamp = record.timestamp, "merging drone record");
        self.drones.push(record);
        self.drones = normalize(std::mem::take(&mut self.drones));
    }

    /// Bulk-merge a batch of history (the bootstrap fetch, or a replayed
    /// range). Both collections are renormalized once at the end.
    pub fn merge_history(&mut self, fires: Vec<FireRecord>, drones: Vec<DroneRecord>) {
        debug!(
            fires = fires.len(),
            drones = drones.len(),
            "merging history batch"
        );
        self.fires.extend(fires);
        self.drones.extend(drones);
        self.fires = normalize(std::mem::take(&mut self.fires));
        self.drones = normalize(std::mem::take(&mut self.drones));
    }

    /// Merge one notification into the notification set.
    ///
    /// A repeat id replaces the prior entry; whether the prior entry's
    /// acknowledgement survives is governed by `policy`.
    pub fn merge_notification(&mut self, mut notification: Notification, policy: AckPolicy) {
        if policy == AckPolicy::PreserveAcknowledged
            && self
                .notifications
                .iter()
                .any(|cached| cached.id == notification.id && cached.acknowledged)
        {
            notification.acknowledged = true;
        }
        debug!(
            id = %notification.id,
            severity = notification.severity.as_str(),
            "merging notification"
        );
        self.notifications.push(notification);
        self.notifications = normalize_notifications(std::mem::take(&mut self.notifications));
    }

    /// Mark the notification with the given id as acknowledged.
    ///
    /// Returns `true` if the id was found, `false` otherwise (no-op).
    pub fn acknowledge(&mut self, id: &str) -> bool {
        for notification in &mut self.notifications {
            if notification.id == id {
                notification.acknowledged = true;
                return true;
            }
        }
        false
    }

    /// Mark every notification as acknowledged.
    pub fn acknowledge_all(&mut self) {
        for notification in &mut self.notifications {
            notification.acknowledged = true;
        }
    }

    /// Remove all acknowledged notifications.
    pub fn clear_acknowledged(&mut self) {
        self.notifications.retain(|notification| !notification.acknowledged);
    }

    /// Number of notifications awaiting acknowledgement.
    pub fn unacknowledged_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.acknowledged)
            .count()
    }

    /// The fire history, ascending by timestamp.
    pub fn fires(&self) -> &[FireRecord] {
        &self.fires
    }

    /// The drone history, ascending by timestamp.
    pub fn drones(&self) -> &[DroneRecord] {
        &self.drones
    }

    /// The notification set in storage order (ascending by timestamp).
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// The notification set in display order (descending by timestamp).
    pub fn notifications_newest_first(&self) -> Vec<Notification> {
        self.notifications.iter().rev().cloned().collect()
    }

    /// The newest telemetry instant across both kinds, or `None` while the
    /// cache holds no telemetry. Drives the window controller.
    pub fn latest_timestamp(&self) -> Option<i64> {
        let last_fire = self.fires.last().map(|record| record.timestamp);
        let last_drone = self.drones.last().map(|record| record.timestamp);
        last_fire.max(last_drone)
    }
}

/// The cache as shared between the stream tasks and the timeline session.
///
/// Merge operations complete synchronously inside a write-lock section, so
/// readers never observe a half-merged collection.
pub type SharedCache = Arc<RwLock<EntityCache>>;

/// Create an empty [`SharedCache`].
pub fn shared() -> SharedCache {
    Arc::new(RwLock::new(EntityCache::new()))
}
