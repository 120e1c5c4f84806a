//! Enumeration types shared across the Emberwatch workspace.
//!
//! Every wire-facing enum lives here so the stream client, the query client,
//! and the cache agree on one closed set of variants. String representations
//! match the remote service's payloads exactly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Telemetry kind
// ---------------------------------------------------------------------------

/// The kind of a telemetry entity.
///
/// Telemetry frames carry exactly one of these in their `type` field; the
/// Entity Cache keeps one collection per kind. The set is closed — an
/// unrecognized kind is rejected at the stream boundary, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum TelemetryKind {
    /// A tracked wildfire.
    Fire,
    /// A firefighting drone.
    Drone,
}

impl TelemetryKind {
    /// Wire name of the kind (`"fire"` or `"drone"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Drone => "drone",
        }
    }
}

// ---------------------------------------------------------------------------
// Entity status
// ---------------------------------------------------------------------------

/// Operational status of a fire entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FireStatus {
    /// Burning and spreading.
    Active,
    /// Burning beyond containment thresholds.
    Critical,
    /// Perimeter established, no longer spreading.
    Contained,
}

/// Operational status of a drone entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum DroneStatus {
    /// Flying and operational.
    Active,
    /// Battery below the operational threshold.
    #[serde(rename = "Low Battery")]
    LowBattery,
    /// Water reservoir below the operational threshold.
    #[serde(rename = "Low Water")]
    LowWater,
    /// Multiple resources critical; the drone must return.
    Critical,
}

// ---------------------------------------------------------------------------
// Notification severity
// ---------------------------------------------------------------------------

/// Severity of an operational notification.
///
/// Ordering follows urgency: [`Severity::Critical`] sorts first. Severity
/// strings the service may add in the future deserialize to [`Severity::Info`]
/// so an unknown level degrades to the neutral presentation instead of
/// dropping the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Immediate operator attention required.
    Critical,
    /// Significant and time-sensitive.
    High,
    /// Noteworthy, not urgent.
    Medium,
    /// Routine operational chatter.
    Low,
    /// Informational only. Also the fallback for unknown severity strings.
    #[serde(other)]
    Info,
}

impl Severity {
    /// Wire name of the severity level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }
}
