//! Completed-lesson tracking

use std::collections::BTreeSet;
use std::rc::Rc;

use super::{load_lesson_ids, save_lesson_ids};
use crate::content::{Catalog, LessonId};
use crate::store::{KeyValueStore, SharedStore, StoreError};

const COMPLETED_KEY: &str = "completedLessons";

/// Owns the set of completed lessons.
///
/// The set only grows; lessons are never un-completed except by [`reset`](Self::reset).
/// Ids are not validated against the catalog.
pub struct ProgressTracker {
    store: SharedStore,
    catalog: Rc<Catalog>,
    completed: BTreeSet<LessonId>,
}

impl ProgressTracker {
    /// Load the completed set from the store
    pub fn load(store: SharedStore, catalog: Rc<Catalog>) -> Result<Self, StoreError> {
        let completed = load_lesson_ids(store.as_ref(), COMPLETED_KEY)?;
        tracing::debug!("Loaded {} completed lessons", completed.len());
        Ok(Self {
            store,
            catalog,
            completed,
        })
    }

    /// Record a lesson as completed. Repeated calls have no further effect.
    pub fn mark_completed(&mut self, lesson_id: LessonId) -> Result<(), StoreError> {
        if !self.completed.insert(lesson_id) {
            return Ok(());
        }
        tracing::debug!("Lesson {} completed", lesson_id);
        save_lesson_ids(self.store.as_ref(), COMPLETED_KEY, &self.completed)
    }

    pub fn is_completed(&self, lesson_id: LessonId) -> bool {
        self.completed.contains(&lesson_id)
    }

    /// Completed ids in ascending order
    pub fn completed_ids(&self) -> impl Iterator<Item = LessonId> + '_ {
        self.completed.iter().copied()
    }

    pub fn total_completed(&self) -> usize {
        self.completed.len()
    }

    pub fn total_lessons(&self) -> usize {
        self.catalog.total_lessons()
    }

    /// Share of the catalog completed, in `[0, 1]`; 0 for an empty catalog.
    ///
    /// Ids that are not in the catalog do not count towards the fraction.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_lessons();
        if total == 0 {
            return 0.0;
        }
        let done = self
            .catalog
            .lessons()
            .iter()
            .filter(|l| self.is_completed(l.id))
            .count();
        done as f64 / total as f64
    }

    /// Forget every completed lesson and erase the stored record
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.completed.clear();
        tracing::info!("Lesson progress reset");
        self.store.remove(COMPLETED_KEY)
    }
}
