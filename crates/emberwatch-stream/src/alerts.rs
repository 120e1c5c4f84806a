//! Severity-driven alert presentation.
//!
//! The toast/alert surface is an external collaborator behind [`AlertSink`];
//! this module only decides *how* a notification should be presented. The
//! mapping is a lookup from severity to policy, not an inline conditional
//! chain, so adding a severity level touches exactly one place.

use std::time::Duration;

use emberwatch_types::{Notification, Severity};

/// How the alert surface should present one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPresentation {
    /// Keep the alert visible until the operator dismisses it.
    Persist,
    /// Auto-expire the alert after the given duration.
    Expire(Duration),
}

/// Presentation policy for a severity level.
///
/// Critical alerts persist until manually dismissed; high/medium/low expire
/// on a severity-scaled timer. [`Severity::Info`] — which also absorbs
/// unknown wire severities — gets the neutral default.
pub const fn presentation_for(severity: Severity) -> AlertPresentation {
    match severity {
        Severity::Critical => AlertPresentation::Persist,
        Severity::High => AlertPresentation::Expire(Duration::from_secs(8)),
        Severity::Medium => AlertPresentation::Expire(Duration::from_secs(6)),
        Severity::Low => AlertPresentation::Expire(Duration::from_secs(5)),
        Severity::Info => AlertPresentation::Expire(Duration::from_secs(5)),
    }
}

/// The alert surface collaborator.
///
/// Implementations receive every well-formed notification exactly once,
/// already merged into the cache, together with its presentation policy.
pub trait AlertSink: Send + Sync {
    /// Present one notification to the operator.
    fn present(&self, notification: &Notification, presentation: AlertPresentation);
}
