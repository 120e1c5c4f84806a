//! Bounded historical range queries.
//!
//! A range query asks the remote service for a paginated slice of history
//! outside the live window — ad-hoc inspection, not the live display path.
//! Bounds are epoch milliseconds; omitted bounds default to the trailing
//! 24 hours.

use emberwatch_core::window::WINDOW_DURATION_MS;
use emberwatch_types::{DroneRecord, FireRecord};
use serde::Deserialize;

/// Restrict a range query to one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityFilter {
    /// Fire records only.
    Fires,
    /// Drone records only.
    Drones,
}

impl EntityFilter {
    /// Query-parameter value for the filter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fires => "fires",
            Self::Drones => "drones",
        }
    }
}

/// Parameters of one bounded range query.
#[derive(Debug, Clone)]
pub struct RangeQuery {
    /// Lower bound, epoch ms. Defaults to `end - 24 h` when omitted.
    pub start_ms: Option<i64>,
    /// Upper bound, epoch ms. Defaults to "now" when omitted.
    pub end_ms: Option<i64>,
    /// Optional entity kind filter.
    pub entity: Option<EntityFilter>,
    /// 1-based page index.
    pub page: u32,
    /// Records per page and per kind.
    pub page_size: u32,
}

impl Default for RangeQuery {
    fn default() -> Self {
        Self {
            start_ms: None,
            end_ms: None,
            entity: None,
            page: 1,
            page_size: 50,
        }
    }
}

impl RangeQuery {
    /// Resolve the effective bounds against the current instant.
    pub const fn resolve_bounds(&self, now_ms: i64) -> (i64, i64) {
        let end = match self.end_ms {
            Some(end) => end,
            None => now_ms,
        };
        let start = match self.start_ms {
            Some(start) => start,
            None => end.saturating_sub(WINDOW_DURATION_MS),
        };
        (start, end)
    }
}

/// Per-kind totals for pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RangeTotals {
    /// Total fire records matching the bounds (all pages).
    #[serde(default)]
    pub fires: u64,
    /// Total drone records matching the bounds (all pages).
    #[serde(default)]
    pub drones: u64,
}

/// One page of a range query's result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RangePage {
    /// Fire records on this page.
    #[serde(default)]
    pub fires: Vec<FireRecord>,
    /// Drone records on this page.
    #[serde(default)]
    pub drones: Vec<DroneRecord>,
    /// Totals for pagination.
    #[serde(default)]
    pub totals: RangeTotals,
}
