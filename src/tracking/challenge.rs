//! Daily challenge completion

use std::rc::Rc;

use chrono::NaiveDate;

use crate::content::{Catalog, daily_index};
use crate::store::{KeyValueStore, SharedStore, StoreError};

const LAST_INDEX_KEY: &str = "lastChallengeIndex";

/// Remembers which rotating challenge was completed last.
///
/// Completion is keyed by the challenge's rotation index rather than the date,
/// so a challenge done a full rotation ago would count as done again.
pub struct ChallengeTracker {
    store: SharedStore,
    catalog: Rc<Catalog>,
    last_index: Option<usize>,
}

impl ChallengeTracker {
    pub fn load(store: SharedStore, catalog: Rc<Catalog>) -> Result<Self, StoreError> {
        // -1 marks "never completed"
        let last_index = store
            .get_int(LAST_INDEX_KEY)?
            .and_then(|i| usize::try_from(i).ok());
        Ok(Self {
            store,
            catalog,
            last_index,
        })
    }

    /// Whether the challenge shown on `date` was already completed
    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        match daily_index(date, self.catalog.challenges.len()) {
            Some(index) => self.last_index == Some(index),
            None => false,
        }
    }

    /// Mark the challenge shown on `date` as done; returns false if the
    /// catalog has no challenges
    pub fn complete_on(&mut self, date: NaiveDate) -> Result<bool, StoreError> {
        let Some(index) = daily_index(date, self.catalog.challenges.len()) else {
            return Ok(false);
        };
        self.last_index = Some(index);
        tracing::debug!("Daily challenge {} completed", index);
        self.store.set_int(LAST_INDEX_KEY, index as i64)?;
        Ok(true)
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.last_index = None;
        self.store.remove(LAST_INDEX_KEY)
    }
}
