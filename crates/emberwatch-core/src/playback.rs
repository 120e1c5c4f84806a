//! Playback scheduling through the display window.
//!
//! The scheduler owns the cursor — the instant currently displayed — and
//! advances it through the window at a configurable rate, independent of
//! data arrival. It reads window bounds but never moves them.
//!
//! The async side (the 200 ms interval) lives with whoever drives the
//! scheduler; aborting that task stops the timer, so no tick can fire
//! after teardown. Everything here is pure cursor arithmetic.

use std::str::FromStr;
use std::time::Duration;

use crate::window::{PIN_THRESHOLD_MS, TimeWindow, WindowAdvance};

/// Fixed interval between playback ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// A full playback pass crosses the window in this many base steps.
pub const CURSOR_STEPS_PER_WINDOW: i64 = 100;

/// Errors from playback configuration.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// The speed string did not match a supported multiplier.
    #[error("unknown playback speed: {0} (expected one of 0.5, 1, 2, 5, 10)")]
    UnknownSpeed(String),
}

/// Supported playback rate multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackSpeed {
    /// Half real rate (0.5x).
    Half,
    /// Base rate (1x).
    #[default]
    Normal,
    /// Double rate (2x).
    Double,
    /// Five times the base rate (5x).
    Fast,
    /// Ten times the base rate (10x).
    Fastest,
}

impl PlaybackSpeed {
    /// Human-readable multiplier label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Half => "0.5x",
            Self::Normal => "1x",
            Self::Double => "2x",
            Self::Fast => "5x",
            Self::Fastest => "10x",
        }
    }

    /// Scale a base step by this multiplier.
    pub fn scale(self, base_ms: i64) -> i64 {
        match self {
            Self::Half => base_ms.checked_div(2).unwrap_or(0),
            Self::Normal => base_ms,
            Self::Double => base_ms.saturating_mul(2),
            Self::Fast => base_ms.saturating_mul(5),
            Self::Fastest => base_ms.saturating_mul(10),
        }
    }
}

impl FromStr for PlaybackSpeed {
    type Err = PlaybackError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().trim_end_matches('x') {
            "0.5" => Ok(Self::Half),
            "1" => Ok(Self::Normal),
            "2" => Ok(Self::Double),
            "5" => Ok(Self::Fast),
            "10" => Ok(Self::Fastest),
            other => Err(PlaybackError::UnknownSpeed(other.to_owned())),
        }
    }
}

/// Whether the scheduler is advancing the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Cursor is stationary.
    #[default]
    Paused,
    /// Cursor advances on every tick.
    Playing,
}

/// Owner of the playback cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackScheduler {
    cursor: i64,
    state: PlaybackState,
    speed: PlaybackSpeed,
}

impl PlaybackScheduler {
    /// Create a paused scheduler with the cursor at `cursor_ms` — typically
    /// the window end, so a fresh console starts pinned to "now".
    pub const fn new(cursor_ms: i64) -> Self {
        Self {
            cursor: cursor_ms,
            state: PlaybackState::Paused,
            speed: PlaybackSpeed::Normal,
        }
    }

    /// The instant currently displayed, epoch milliseconds.
    pub const fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Current play/pause state.
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current rate multiplier.
    pub const fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    /// Change the rate multiplier. Takes effect from the next tick.
    pub const fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    /// Toggle between playing and paused.
    pub const fn toggle(&mut self, window: &TimeWindow) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(window),
        }
    }

    /// Start playing.
    ///
    /// If the cursor sits at the live edge (within the pin threshold of the
    /// window end), it first rewinds to the window start — replaying from
    /// the beginning rather than "playing" a single instant.
    pub const fn play(&mut self, window: &TimeWindow) {
        let distance = window.end().saturating_sub(self.cursor).saturating_abs();
        if distance <= PIN_THRESHOLD_MS {
            self.cursor = window.start();
        }
        self.state = PlaybackState::Playing;
    }

    /// Stop advancing the cursor.
    pub const fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Manually position the cursor.
    ///
    /// Seeking always pauses playback and clamps the target into the
    /// window bounds.
    pub const fn seek(&mut self, target_ms: i64, window: &TimeWindow) {
        self.cursor = window.clamp(target_ms);
        self.state = PlaybackState::Paused;
    }

    /// Advance one tick: move the cursor by `(window / 100) * speed`.
    ///
    /// Reaching or passing the window end clamps the cursor to the end and
    /// pauses — playback self-stops at the live edge, never overshoots.
    /// A paused scheduler ignores ticks. Returns the cursor after the tick.
    pub fn tick(&mut self, window: &TimeWindow) -> i64 {
        if self.state == PlaybackState::Paused {
            return self.cursor;
        }
        let base = window
            .duration_ms()
            .checked_div(CURSOR_STEPS_PER_WINDOW)
            .unwrap_or(0);
        let next = self.cursor.saturating_add(self.speed.scale(base));
        if next >= window.end() {
            self.cursor = window.end();
            self.state = PlaybackState::Paused;
        } else {
            self.cursor = next;
        }
        self.cursor
    }

    /// Adopt the cursor produced by a window advance (pin-follow or clamp).
    pub const fn follow_window(&mut self, advance: &WindowAdvance) {
        if advance.moved {
            self.cursor = advance.cursor;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use crate::window::WindowController;

    use super::*;

    fn window(start: i64, end: i64) -> TimeWindow {
        TimeWindow::ending_at(end, end - start)
    }

    #[test]
    fn play_at_live_edge_rewinds_to_start() {
        let window = window(0, 100_000);
        let mut scheduler = PlaybackScheduler::new(100_000);
        scheduler.play(&window);
        assert_eq!(scheduler.cursor(), 0);
        assert_eq!(scheduler.state(), PlaybackState::Playing);
    }

    #[test]
    fn play_mid_window_resumes_in_place() {
        let window = window(0, 100_000);
        let mut scheduler = PlaybackScheduler::new(40_000);
        scheduler.play(&window);
        assert_eq!(scheduler.cursor(), 40_000);
        assert_eq!(scheduler.state(), PlaybackState::Playing);
    }

    #[test]
    fn tick_advances_by_a_hundredth_of_the_window() {
        let window = window(0, 100_000);
        let mut scheduler = PlaybackScheduler::new(0);
        scheduler.play(&window);
        assert_eq!(scheduler.tick(&window), 1_000);
        assert_eq!(scheduler.tick(&window), 2_000);
    }

    #[test]
    fn speed_scales_the_step() {
        let window = window(0, 100_000);
        for (speed, expected) in [
            (PlaybackSpeed::Half, 500),
            (PlaybackSpeed::Normal, 1_000),
            (PlaybackSpeed::Double, 2_000),
            (PlaybackSpeed::Fast, 5_000),
            (PlaybackSpeed::Fastest, 10_000),
        ] {
            let mut scheduler = PlaybackScheduler::new(0);
            scheduler.set_speed(speed);
            scheduler.play(&window);
            assert_eq!(scheduler.tick(&window), expected, "{}", speed.label());
        }
    }

    #[test]
    fn playback_clamps_at_the_live_edge_and_pauses() {
        let window = window(0, 100_000);
        let mut scheduler = PlaybackScheduler::new(99_500);
        scheduler.state = PlaybackState::Playing;
        let cursor = scheduler.tick(&window);
        assert_eq!(cursor, 100_000);
        assert_eq!(scheduler.state(), PlaybackState::Paused);

        // A further tick does not move past the edge.
        assert_eq!(scheduler.tick(&window), 100_000);
    }

    #[test]
    fn paused_scheduler_ignores_ticks() {
        let window = window(0, 100_000);
        let mut scheduler = PlaybackScheduler::new(50_000);
        assert_eq!(scheduler.tick(&window), 50_000);
        assert_eq!(scheduler.cursor(), 50_000);
    }

    #[test]
    fn seek_pauses_and_clamps() {
        let window = window(10_000, 100_000);
        let mut scheduler = PlaybackScheduler::new(100_000);
        scheduler.play(&window);
        scheduler.seek(5_000, &window);
        assert_eq!(scheduler.cursor(), 10_000);
        assert_eq!(scheduler.state(), PlaybackState::Paused);
    }

    #[test]
    fn follow_window_adopts_pinned_cursor() {
        let mut controller = WindowController::new(1_000);
        let mut scheduler = PlaybackScheduler::new(1_000);
        let advance = controller.advance(2_000, scheduler.cursor());
        scheduler.follow_window(&advance);
        assert_eq!(scheduler.cursor(), 2_000);
    }

    #[test]
    fn follow_window_ignores_noop_advance() {
        let mut controller = WindowController::new(1_000);
        let mut scheduler = PlaybackScheduler::new(700);
        let advance = controller.advance(900, scheduler.cursor());
        scheduler.follow_window(&advance);
        assert_eq!(scheduler.cursor(), 700);
    }

    #[test]
    fn speed_parses_from_config_strings() {
        assert_eq!("0.5".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Half);
        assert_eq!("1".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Normal);
        assert_eq!("2x".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Double);
        assert_eq!("5".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Fast);
        assert_eq!("10".parse::<PlaybackSpeed>().unwrap(), PlaybackSpeed::Fastest);
        assert!("3".parse::<PlaybackSpeed>().is_err());
    }
}
