//! The moving 24-hour display window.
//!
//! The window tracks the newest telemetry instant: its end only ever moves
//! forward, and its start trails the end by a fixed duration. When the
//! window shifts, the playback cursor either follows the live edge (if the
//! operator was "pinned" there) or stays where the operator scrubbed it,
//! clamped into the new bounds.

/// Fixed window span: 24 hours in milliseconds.
pub const WINDOW_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// How close (in ms) the cursor must be to the live edge to count as pinned.
pub const PIN_THRESHOLD_MS: i64 = 1_500;

/// A half-open span of history eligible for display and playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// Build a window ending at `end_ms` spanning `duration_ms` back.
    pub const fn ending_at(end_ms: i64, duration_ms: i64) -> Self {
        Self {
            start: end_ms.saturating_sub(duration_ms),
            end: end_ms,
        }
    }

    /// Window start, epoch milliseconds.
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Window end (the live edge), epoch milliseconds.
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Window span in milliseconds.
    pub const fn duration_ms(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    /// Clamp an instant into the window bounds.
    pub const fn clamp(&self, instant_ms: i64) -> i64 {
        if instant_ms < self.start {
            self.start
        } else if instant_ms > self.end {
            self.end
        } else {
            instant_ms
        }
    }

    /// Whether an instant lies within the window bounds (inclusive).
    pub const fn contains(&self, instant_ms: i64) -> bool {
        instant_ms >= self.start && instant_ms <= self.end
    }
}

/// Outcome of a window advance attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAdvance {
    /// Whether the window actually moved.
    pub moved: bool,
    /// Whether the cursor was pinned to the live edge before the move.
    pub pinned: bool,
    /// The cursor after the move: the new end if pinned, otherwise the
    /// caller's cursor clamped into the new bounds.
    pub cursor: i64,
}

/// Owner of the window bounds.
///
/// The controller never moves the window backward: an advance with a
/// timestamp at or before the current end is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowController {
    window: TimeWindow,
    duration_ms: i64,
    pin_threshold_ms: i64,
}

impl WindowController {
    /// Create a controller with the fixed 24 h span, ending at `end_ms`.
    pub const fn new(end_ms: i64) -> Self {
        Self::with_tuning(end_ms, WINDOW_DURATION_MS, PIN_THRESHOLD_MS)
    }

    /// Create a controller with explicit span and pin threshold (tests and
    /// replay tooling).
    pub const fn with_tuning(end_ms: i64, duration_ms: i64, pin_threshold_ms: i64) -> Self {
        Self {
            window: TimeWindow::ending_at(end_ms, duration_ms),
            duration_ms,
            pin_threshold_ms,
        }
    }

    /// Current window bounds.
    pub const fn window(&self) -> TimeWindow {
        self.window
    }

    /// Slide the window forward to `latest_ms` if it is newer than the
    /// current end; otherwise leave everything untouched.
    ///
    /// Pinning is judged against the end *before* the move: the cursor is
    /// pinned if it sits within the pin threshold of the old end. A pinned
    /// cursor follows to the new end; an unpinned cursor is clamped into the
    /// new bounds but otherwise preserved, so manual scrubbing survives
    /// live data arrival.
    pub const fn advance(&mut self, latest_ms: i64, cursor_ms: i64) -> WindowAdvance {
        let old_end = self.window.end;
        if latest_ms <= old_end {
            return WindowAdvance {
                moved: false,
                pinned: false,
                cursor: cursor_ms,
            };
        }

        let distance = cursor_ms.saturating_sub(old_end).saturating_abs();
        let pinned =
            distance <= self.pin_threshold_ms || cursor_ms >= old_end.saturating_sub(self.pin_threshold_ms);

        self.window = TimeWindow::ending_at(latest_ms, self.duration_ms);

        let cursor = if pinned {
            self.window.end
        } else {
            self.window.clamp(cursor_ms)
        };

        WindowAdvance {
            moved: true,
            pinned,
            cursor,
        }
    }
}
