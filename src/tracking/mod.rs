//! Learner progress tracking
//!
//! Each tracker owns a disjoint slice of learner state, loads it from the
//! shared [`KeyValueStore`](crate::store::KeyValueStore) once at construction
//! and writes it back synchronously after every mutation. Trackers never call
//! each other; the only cross-read is [`StatsTracker::estimated_minutes_learned`]
//! which borrows the [`ProgressTracker`].

pub mod bookmarks;
pub mod challenge;
pub mod progress;
pub mod stats;
pub mod streak;

use std::collections::BTreeSet;

pub use bookmarks::BookmarkTracker;
pub use challenge::ChallengeTracker;
pub use progress::ProgressTracker;
pub use stats::{QuizStatistics, StatsTracker};
pub use streak::{CheckIn, StreakState, StreakTracker};

use crate::content::LessonId;
use crate::store::{KeyValueStore, StoreError};

/// Load a set of lesson ids, skipping entries that are not valid ids
fn load_lesson_ids(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<BTreeSet<LessonId>, StoreError> {
    let raw = store.get_int_list(key)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|id| match LessonId::try_from(id) {
            Ok(id) => Some(id),
            Err(_) => {
                tracing::warn!("Skipping invalid lesson id {} under '{}'", id, key);
                None
            }
        })
        .collect())
}

fn save_lesson_ids(
    store: &dyn KeyValueStore,
    key: &str,
    ids: &BTreeSet<LessonId>,
) -> Result<(), StoreError> {
    store.set_int_list(key, ids.iter().map(|&id| i64::from(id)).collect())
}
