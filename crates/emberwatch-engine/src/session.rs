//! The timeline session: window advancement and playback driving.
//!
//! The session is the single consumer of the timeline state. It reacts to
//! two inputs — the newest telemetry instant (from the stream router's
//! watch channel) and the fixed 200 ms playback tick — and hands every
//! newly reconstructed scene to the rendering collaborator.
//!
//! Aborting the task that runs [`TimelineSession::run`] stops the tick
//! timer; no tick fires after teardown.

use emberwatch_core::cache::SharedCache;
use emberwatch_core::playback::{PlaybackScheduler, PlaybackSpeed, TICK_INTERVAL};
use emberwatch_core::snapshot::{Scene, SceneSink};
use emberwatch_core::window::WindowController;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Owns the window controller and playback scheduler and drives both.
pub struct TimelineSession {
    cache: SharedCache,
    window: WindowController,
    playback: PlaybackScheduler,
    latest_rx: watch::Receiver<i64>,
    sink: Box<dyn SceneSink + Send>,
    last_rendered: Option<i64>,
}

impl TimelineSession {
    /// Create a session with the window ending at `initial_end_ms` and the
    /// cursor pinned there.
    pub fn new(
        cache: SharedCache,
        latest_rx: watch::Receiver<i64>,
        sink: Box<dyn SceneSink + Send>,
        initial_end_ms: i64,
        speed: PlaybackSpeed,
    ) -> Self {
        let mut playback = PlaybackScheduler::new(initial_end_ms);
        playback.set_speed(speed);
        Self {
            cache,
            window: WindowController::new(initial_end_ms),
            playback,
            latest_rx,
            sink,
            last_rendered: None,
        }
    }

    /// Start a playback pass over the current window (autoplay).
    ///
    /// The cursor starts pinned at the live edge, so this rewinds to the
    /// window start and plays forward.
    pub fn start_replay(&mut self) {
        let window = self.window.window();
        self.playback.play(&window);
        debug!(
            start = window.start(),
            end = window.end(),
            speed = self.playback.speed().label(),
            "replay started"
        );
    }

    /// Drive the session until the latest-instant channel closes.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                changed = self.latest_rx.changed() => {
                    if changed.is_err() {
                        debug!("latest-instant channel closed; session ending");
                        return;
                    }
                    let latest = *self.latest_rx.borrow_and_update();
                    self.advance_window(latest);
                }
                _ = ticker.tick() => {
                    self.step().await;
                }
            }
        }
    }

    /// Slide the window toward a newly observed instant and let the cursor
    /// follow (pinned) or stay clamped (scrubbed).
    fn advance_window(&mut self, latest_ms: i64) {
        let advance = self.window.advance(latest_ms, self.playback.cursor());
        if advance.moved {
            self.playback.follow_window(&advance);
            debug!(
                end = self.window.window().end(),
                pinned = advance.pinned,
                cursor = advance.cursor,
                "window advanced"
            );
        }
    }

    /// One playback tick: advance the cursor, and render if it moved.
    async fn step(&mut self) {
        let window = self.window.window();
        let cursor = self.playback.tick(&window);
        if self.last_rendered == Some(cursor) {
            return;
        }
        let scene = {
            let cache = self.cache.read().await;
            Scene::capture(&cache, cursor)
        };
        self.sink.render(&scene);
        self.last_rendered = Some(cursor);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::{Arc, Mutex};

    use emberwatch_core::cache;
    use emberwatch_types::{FireRecord, FireStatus};

    use super::*;

    /// Scene sink that records every rendered cursor position.
    struct RecordingSink {
        rendered: Arc<Mutex<Vec<i64>>>,
    }

    impl SceneSink for RecordingSink {
        fn render(&mut self, scene: &Scene) {
            if let Ok(mut rendered) = self.rendered.lock() {
                rendered.push(scene.at);
            }
        }
    }

    fn fire(id: &str, timestamp: i64) -> FireRecord {
        FireRecord {
            id: id.to_owned(),
            timestamp,
            lat: 34.07,
            lng: -118.44,
            intensity: 60,
            size: 45,
            status: FireStatus::Active,
        }
    }

    fn session(initial_end: i64) -> (TimelineSession, watch::Sender<i64>, Arc<Mutex<Vec<i64>>>) {
        let cache = cache::shared();
        let (latest_tx, latest_rx) = watch::channel(0);
        let rendered = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingSink {
            rendered: Arc::clone(&rendered),
        };
        let session = TimelineSession::new(
            cache,
            latest_rx,
            Box::new(sink),
            initial_end,
            PlaybackSpeed::Normal,
        );
        (session, latest_tx, rendered)
    }

    #[tokio::test]
    async fn pinned_cursor_follows_window_and_renders_the_live_edge() {
        let (mut session, _latest_tx, rendered) = session(1_000);
        {
            let mut guard = session.cache.write().await;
            guard.merge_fire(fire("F-1", 2_000));
        }

        session.advance_window(2_000);
        assert_eq!(session.playback.cursor(), 2_000);

        session.step().await;
        assert_eq!(rendered.lock().unwrap().as_slice(), &[2_000]);
    }

    #[tokio::test]
    async fn idle_session_renders_once_per_cursor_position() {
        let (mut session, _latest_tx, rendered) = session(1_000);
        session.step().await;
        session.step().await;
        session.step().await;
        assert_eq!(rendered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replay_advances_from_the_window_start() {
        let (mut session, _latest_tx, rendered) = session(1_000_000);
        session.start_replay();
        let start = session.window.window().start();
        assert_eq!(session.playback.cursor(), start);

        session.step().await;
        session.step().await;

        let rendered = rendered.lock().unwrap();
        assert_eq!(rendered.len(), 2);
        assert!(rendered.iter().all(|&at| at > start));
        assert!(rendered.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[tokio::test]
    async fn session_ends_when_the_latest_channel_closes() {
        let (session, latest_tx, _) = session(1_000);
        let task = tokio::spawn(session.run());
        drop(latest_tx);
        task.await.unwrap();
    }
}
