//! Point-in-time snapshot reconstruction.
//!
//! A snapshot answers "what did the world look like at instant T": for each
//! entity id, the most recent observation at or before T. Entities first
//! observed after T are absent — history is never back-filled. The same
//! query serves the live display (T = now) and historical scrubbing.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use emberwatch_types::{DroneRecord, FireRecord, Observation};
use serde::Serialize;

use crate::cache::EntityCache;

/// Reconstruct the state of every entity in `collection` as of `target_ms`.
///
/// Returns one record per distinct id: the observation with the greatest
/// timestamp `<= target_ms`. Ids with no observation at or before the
/// target contribute nothing. One pass over the collection; output is
/// ascending by id. Deterministic and side-effect free; an empty collection
/// yields an empty snapshot.
pub fn snapshot_at<T: Observation + Clone>(collection: &[T], target_ms: i64) -> Vec<T> {
    let mut latest: BTreeMap<&str, &T> = BTreeMap::new();
    for record in collection {
        if record.timestamp_ms() > target_ms {
            continue;
        }
        match latest.entry(record.id()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if record.timestamp_ms() >= slot.get().timestamp_ms() {
                    slot.insert(record);
                }
            }
        }
    }
    latest.into_values().cloned().collect()
}

/// The reconstructed world at one instant, as handed to the rendering
/// collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// The instant this scene reconstructs, epoch milliseconds.
    pub at: i64,
    /// Current state of every fire observed at or before `at`.
    pub fires: Vec<FireRecord>,
    /// Current state of every drone observed at or before `at`.
    pub drones: Vec<DroneRecord>,
}

impl Scene {
    /// Reconstruct the scene at `target_ms` from the cache's collections.
    pub fn capture(cache: &EntityCache, target_ms: i64) -> Self {
        Self {
            at: target_ms,
            fires: snapshot_at(cache.fires(), target_ms),
            drones: snapshot_at(cache.drones(), target_ms),
        }
    }
}

/// The rendering collaborator: accepts a reconstructed scene and draws it.
///
/// Rendering itself (map tiles, markers, layout) is outside this engine;
/// the timeline session hands every newly reconstructed scene to whatever
/// implementation it was wired with.
pub trait SceneSink {
    /// Render one scene.
    fn render(&mut self, scene: &Scene);
}
