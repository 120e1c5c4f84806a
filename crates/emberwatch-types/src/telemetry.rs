//! Telemetry record shapes and the identity seam used for reconciliation.
//!
//! Fires and drones share a common base (id, timestamp, position) plus
//! per-kind fields; the two structs are tied together by the [`Observation`]
//! trait so the normalizer and snapshot reconstructor can stay generic over
//! the kind. The wire frame is the tagged [`TelemetryFrame`] variant.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DroneStatus, FireStatus, TelemetryKind};

// ---------------------------------------------------------------------------
// Identity seam
// ---------------------------------------------------------------------------

/// A timestamped observation of one entity.
///
/// Identity for deduplication is the pair `(id, timestamp_ms)`: the same
/// entity observed twice at the same instant collapses to one record, while
/// observations at different instants are distinct historical points.
pub trait Observation {
    /// Stable entity identifier (e.g. `"F-2"`, `"D-14"`).
    fn id(&self) -> &str;

    /// Observation instant in epoch milliseconds.
    fn timestamp_ms(&self) -> i64;
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One timestamped observation of a tracked fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FireRecord {
    /// Stable fire identifier assigned by the detection system.
    pub id: String,
    /// Observation instant, epoch milliseconds.
    #[ts(type = "number")]
    pub timestamp: i64,
    /// Latitude of the fire centroid.
    pub lat: f64,
    /// Longitude of the fire centroid.
    pub lng: f64,
    /// Burn intensity, 0–100.
    pub intensity: u8,
    /// Estimated burned area in acres.
    pub size: u32,
    /// Operational status at this instant.
    pub status: FireStatus,
}

impl Observation for FireRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp_ms(&self) -> i64 {
        self.timestamp
    }
}

/// One timestamped observation of a firefighting drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DroneRecord {
    /// Stable drone identifier assigned by fleet management.
    pub id: String,
    /// Observation instant, epoch milliseconds.
    #[ts(type = "number")]
    pub timestamp: i64,
    /// Latitude of the drone.
    pub lat: f64,
    /// Longitude of the drone.
    pub lng: f64,
    /// Battery charge, 0–100.
    pub battery: u8,
    /// Water reservoir level, 0–100.
    pub water: u8,
    /// Operational status at this instant.
    pub status: DroneStatus,
}

impl Observation for DroneRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp_ms(&self) -> i64 {
        self.timestamp
    }
}

// ---------------------------------------------------------------------------
// Wire frame
// ---------------------------------------------------------------------------

/// An inbound telemetry stream frame: `{ "type": ..., "payload": ... }`.
///
/// The kind set is closed. Frames whose `type` is anything other than
/// `"fire"` or `"drone"` fail to deserialize and are dropped at the stream
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum TelemetryFrame {
    /// A fire observation.
    Fire(FireRecord),
    /// A drone observation.
    Drone(DroneRecord),
}

impl TelemetryFrame {
    /// The kind tag of this frame.
    pub const fn kind(&self) -> TelemetryKind {
        match self {
            Self::Fire(_) => TelemetryKind::Fire,
            Self::Drone(_) => TelemetryKind::Drone,
        }
    }

    /// Identifier of the carried record.
    pub fn record_id(&self) -> &str {
        match self {
            Self::Fire(record) => &record.id,
            Self::Drone(record) => &record.id,
        }
    }

    /// Observation instant of the carried record, epoch milliseconds.
    pub const fn timestamp_ms(&self) -> i64 {
        match self {
            Self::Fire(record) => record.timestamp,
            Self::Drone(record) => record.timestamp,
        }
    }
}
