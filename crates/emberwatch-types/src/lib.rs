//! Shared type definitions for the Emberwatch mission console.
//!
//! This crate is the single source of truth for all record shapes used
//! across the Emberwatch workspace. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the console frontend.
//!
//! # Modules
//!
//! - [`enums`] -- Telemetry kinds, entity statuses, and severity levels
//! - [`telemetry`] -- Fire/drone records, the [`Observation`] identity seam,
//!   and the tagged wire frame
//! - [`notification`] -- Operational notification shape
//!
//! [`Observation`]: telemetry::Observation

pub mod enums;
pub mod notification;
pub mod telemetry;

// Re-export all public types at crate root for convenience.
pub use enums::{DroneStatus, FireStatus, Severity, TelemetryKind};
pub use notification::Notification;
pub use telemetry::{DroneRecord, FireRecord, Observation, TelemetryFrame};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::enums::TelemetryKind::export_all();
        let _ = crate::enums::FireStatus::export_all();
        let _ = crate::enums::DroneStatus::export_all();
        let _ = crate::enums::Severity::export_all();
        let _ = crate::telemetry::FireRecord::export_all();
        let _ = crate::telemetry::DroneRecord::export_all();
        let _ = crate::telemetry::TelemetryFrame::export_all();
        let _ = crate::notification::Notification::export_all();
    }
}
