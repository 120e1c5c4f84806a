//! Operational notification shape.
//!
//! Notifications arrive on their own stream channel as bare JSON objects
//! (no envelope). Unlike telemetry they are not historized: identity for
//! deduplication is `id` alone, and a later arrival replaces the earlier
//! one (subject to the cache's acknowledgement policy).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Severity;

/// One operational notification from a monitoring system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Notification {
    /// Unique notification identifier. Dedupe key — one cached entry per id.
    pub id: String,
    /// Emission instant, epoch milliseconds.
    #[ts(type = "number")]
    pub timestamp: i64,
    /// Urgency level. Unknown wire values degrade to [`Severity::Info`].
    pub severity: Severity,
    /// Short headline shown in lists and toasts.
    pub title: String,
    /// Full notification body.
    pub message: String,
    /// Emitting system (e.g. `"Fire Detection System"`).
    pub source: String,
    /// Free-form routing/classification labels.
    #[serde(default)]
    pub labels: BTreeSet<String>,
    /// Whether an operator has acknowledged this notification.
    #[serde(default)]
    pub acknowledged: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_optional_fields() {
        let json = r#"{
            "id": "N-101",
            "severity": "high",
            "title": "New fire detected in Sector A-7",
            "message": "Thermal cameras detected heat signature.",
            "timestamp": 1700000000000,
            "source": "Fire Detection System"
        }"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.id, "N-101");
        assert_eq!(notification.severity, Severity::High);
        assert!(notification.labels.is_empty());
        assert!(!notification.acknowledged);
    }

    #[test]
    fn labels_deserialize_as_a_set() {
        let json = r#"{
            "id": "N-7",
            "severity": "low",
            "title": "Drone D-12 deployed",
            "message": "Reached target.",
            "timestamp": 1700000000000,
            "source": "Drone Management System",
            "labels": ["sector-c", "deployment", "sector-c"]
        }"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.labels.len(), 2);
        assert!(notification.labels.contains("deployment"));
    }

    #[test]
    fn missing_identity_is_rejected() {
        let json = r#"{ "severity": "low", "title": "x", "message": "y", "source": "z" }"#;
        let result: Result<Notification, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
