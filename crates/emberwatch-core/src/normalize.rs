//! Batch deduplication and ordering for cached collections.
//!
//! Every collection the Entity Cache holds passes through one of these two
//! functions on every merge. Both are pure and idempotent:
//! `normalize(normalize(x)) == normalize(x)`.
//!
//! Ties between distinct entities observed at the same instant are broken
//! by id, so the output order is fully deterministic regardless of arrival
//! order — a merge replayed in a different interleaving produces the same
//! collection.

use std::collections::BTreeMap;

use emberwatch_types::{Notification, Observation};

/// Deduplicate and order a batch of telemetry records.
///
/// Records are keyed by `(timestamp, id)`; an exact `(id, timestamp)`
/// collision keeps the last-seen record. Output is ascending by timestamp,
/// then id.
pub fn normalize<T: Observation>(records: Vec<T>) -> Vec<T> {
    let mut keyed: BTreeMap<(i64, String), T> = BTreeMap::new();
    for record in records {
        keyed.insert((record.timestamp_ms(), record.id().to_owned()), record);
    }
    keyed.into_values().collect()
}

/// Deduplicate and order a batch of notifications.
///
/// Notifications are keyed by `id` alone — they are not historized, so a
/// later arrival with the same id replaces the earlier one wholesale.
/// Output is ascending by timestamp (storage order; display reverses it).
pub fn normalize_notifications(notifications: Vec<Notification>) -> Vec<Notification> {
    let mut keyed: BTreeMap<String, Notification> = BTreeMap::new();
    for notification in notifications {
        keyed.insert(notification.id.clone(), notification);
    }
    let mut ordered: Vec<Notification> = keyed.into_values().collect();
    // Stable sort: equal timestamps keep the deterministic id order from
    // the map above.
    ordered.sort_by_key(|notification| notification.timestamp);
    ordered
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use emberwatch_types::{FireRecord, FireStatus, Severity};

    use super::*;

    fn fire(id: &str, timestamp: i64, intensity: u8) -> FireRecord {
        FireRecord {
            id: id.to_owned(),
            timestamp,
            lat: 34.07,
            lng: -118.44,
            intensity,
            size: 40,
            status: FireStatus::Active,
        }
    }

    fn notification(id: &str, timestamp: i64, title: &str) -> Notification {
        Notification {
            id: id.to_owned(),
            timestamp,
            severity: Severity::Medium,
            title: title.to_owned(),
            message: String::new(),
            source: "Fire Detection System".to_owned(),
            labels: std::collections::BTreeSet::new(),
            acknowledged: false,
        }
    }

    #[test]
    fn exact_duplicates_collapse_to_one() {
        let records = vec![fire("F-1", 100, 60), fire("F-1", 100, 60)];
        let normalized = normalize(records);
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn same_key_keeps_last_seen() {
        let records = vec![fire("F-1", 100, 60), fire("F-1", 100, 85)];
        let normalized = normalize(records);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.first().map(|r| r.intensity), Some(85));
    }

    #[test]
    fn distinct_timestamps_are_distinct_history_points() {
        let records = vec![fire("F-1", 200, 75), fire("F-1", 100, 60)];
        let normalized = normalize(records);
        assert_eq!(normalized.len(), 2);
        let timestamps: Vec<i64> = normalized.iter().map(|r| r.timestamp).collect();
        assert_eq!(timestamps, vec![100, 200]);
    }

    #[test]
    fn output_is_ascending_with_unique_keys() {
        let records = vec![
            fire("F-2", 300, 50),
            fire("F-1", 100, 60),
            fire("F-1", 300, 70),
            fire("F-2", 100, 45),
            fire("F-1", 100, 65),
        ];
        let normalized = normalize(records);
        assert_eq!(normalized.len(), 4);
        let mut seen = std::collections::BTreeSet::new();
        let mut last_ts = i64::MIN;
        for record in &normalized {
            assert!(record.timestamp >= last_ts);
            last_ts = record.timestamp;
            assert!(seen.insert((record.id.clone(), record.timestamp)));
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let records = vec![
            fire("F-1", 100, 60),
            fire("F-2", 50, 45),
            fire("F-1", 100, 62),
        ];
        let once = normalize(records);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_tolerates_empty_input() {
        let normalized: Vec<FireRecord> = normalize(Vec::new());
        assert!(normalized.is_empty());
    }

    #[test]
    fn notifications_dedupe_by_id_alone() {
        let notifications = vec![
            notification("N-1", 100, "first"),
            notification("N-1", 500, "replacement"),
        ];
        let normalized = normalize_notifications(notifications);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized.first().map(|n| n.title.as_str()), Some("replacement"));
    }

    #[test]
    fn notifications_sort_ascending_for_storage() {
        let notifications = vec![
            notification("N-3", 300, "c"),
            notification("N-1", 100, "a"),
            notification("N-2", 200, "b"),
        ];
        let normalized = normalize_notifications(notifications);
        let timestamps: Vec<i64> = normalized.iter().map(|n| n.timestamp).collect();
        assert_eq!(timestamps, vec![100, 200, 300]);
    }

    #[test]
    fn notification_normalize_is_idempotent() {
        let notifications = vec![
            notification("N-2", 200, "b"),
            notification("N-1", 100, "a"),
            notification("N-2", 250, "b2"),
        ];
        let once = normalize_notifications(notifications);
        let twice = normalize_notifications(once.clone());
        assert_eq!(once, twice);
    }
}
