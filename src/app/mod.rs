//! Application composition root
//!
//! [`App`] owns the catalog, the store handle and one instance of every
//! tracker. Front ends hold the `App` and call into it; nothing in the crate
//! keeps global state.

pub mod profile;

use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::Config;
use crate::content::{Catalog, LessonId};
use crate::quiz::{self, QuizOutcome};
use crate::store::{JsonFileStore, SharedStore, StoreError};
use crate::tracking::{
    BookmarkTracker, ChallengeTracker, CheckIn, ProgressTracker, StatsTracker, StreakTracker,
};

pub use profile::Profile;

/// Which slice of learner data to reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    Progress,
    Stats,
    Streak,
    Bookmarks,
    Challenge,
    All,
}

/// The main application
pub struct App {
    catalog: Rc<Catalog>,
    passing_ratio: f64,
    check_in_on_start: bool,
    progress: ProgressTracker,
    stats: StatsTracker,
    streak: StreakTracker,
    bookmarks: BookmarkTracker,
    challenge: ChallengeTracker,
}

impl App {
    /// Open the bundled catalog and the on-disk store named by `config`
    pub fn open(config: &Config) -> Result<Self> {
        let catalog = Catalog::builtin().context("Failed to parse bundled catalog")?;
        let store_path = config.store_path()?;
        let store = JsonFileStore::open(&store_path)
            .with_context(|| format!("Failed to open learner data at {:?}", store_path))?;

        let mut app = Self::new(Rc::new(catalog), Rc::new(store))
            .with_context(|| "Failed to load learner data")?;
        app.passing_ratio = config.passing_ratio;
        app.check_in_on_start = config.check_in_on_start;
        Ok(app)
    }

    /// Build every tracker over one store
    pub fn new(catalog: Rc<Catalog>, store: SharedStore) -> Result<Self, StoreError> {
        Ok(Self {
            progress: ProgressTracker::load(store.clone(), catalog.clone())?,
            stats: StatsTracker::load(store.clone(), catalog.clone())?,
            streak: StreakTracker::load(store.clone())?,
            bookmarks: BookmarkTracker::load(store.clone(), catalog.clone())?,
            challenge: ChallengeTracker::load(store, catalog.clone())?,
            catalog,
            passing_ratio: quiz::DEFAULT_PASSING_RATIO,
            check_in_on_start: true,
        })
    }

    /// Startup hook: the daily check-in, unless disabled
    pub fn start_on(&mut self, today: NaiveDate) -> Result<Option<CheckIn>, StoreError> {
        if !self.check_in_on_start {
            return Ok(None);
        }
        self.streak.check_in_on(today).map(Some)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn passing_ratio(&self) -> f64 {
        self.passing_ratio
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub fn streak(&self) -> &StreakTracker {
        &self.streak
    }

    pub fn streak_mut(&mut self) -> &mut StreakTracker {
        &mut self.streak
    }

    pub fn bookmarks(&self) -> &BookmarkTracker {
        &self.bookmarks
    }

    pub fn challenge(&self) -> &ChallengeTracker {
        &self.challenge
    }

    /// Grade and record a finished quiz for `lesson_id`.
    ///
    /// Returns `Ok(None)` when the lesson is not in the catalog.
    pub fn finish_quiz(
        &mut self,
        lesson_id: LessonId,
        answers: &[usize],
    ) -> Result<Option<(QuizOutcome, bool)>, StoreError> {
        let Some(lesson) = self.catalog.lesson(lesson_id) else {
            tracing::warn!("Quiz finished for unknown lesson {}", lesson_id);
            return Ok(None);
        };
        let outcome = QuizOutcome::grade(lesson, answers);
        let passed = quiz::finish_quiz(
            &mut self.progress,
            &mut self.stats,
            outcome,
            self.passing_ratio,
        )?;
        Ok(Some((outcome, passed)))
    }

    pub fn mark_completed(&mut self, lesson_id: LessonId) -> Result<(), StoreError> {
        self.progress.mark_completed(lesson_id)
    }

    pub fn toggle_lesson_bookmark(&mut self, lesson_id: LessonId) -> Result<bool, StoreError> {
        self.bookmarks.toggle_lesson(lesson_id)
    }

    pub fn toggle_term_bookmark(&mut self, name: &str) -> Result<bool, StoreError> {
        self.bookmarks.toggle_term(name)
    }

    /// Complete the challenge shown on `today`, which also counts as a check-in
    pub fn complete_challenge_on(&mut self, today: NaiveDate) -> Result<bool, StoreError> {
        if !self.challenge.complete_on(today)? {
            return Ok(false);
        }
        self.streak.check_in_on(today)?;
        Ok(true)
    }

    /// Snapshot of everything the profile screen shows
    pub fn profile_on(&self, today: NaiveDate) -> Profile {
        let stats = self.stats.statistics();
        Profile {
            completed_lessons: self.progress.total_completed(),
            total_lessons: self.progress.total_lessons(),
            progress_fraction: self.progress.progress_fraction(),
            quizzes_taken: stats.quizzes_taken,
            accuracy_percent: stats.accuracy_percent(),
            minutes_learned: self.stats.estimated_minutes_learned(&self.progress),
            current_streak: self.streak.current_streak(),
            longest_streak: self.streak.longest_streak(),
            checked_in_today: self.streak.has_streak_on(today),
            bookmarked_lessons: self.bookmarks.bookmarked_lessons().len(),
            bookmarked_terms: self.bookmarks.bookmarked_terms().len(),
            challenge_done_today: self.challenge.is_completed_on(today),
        }
    }

    pub fn reset(&mut self, scope: ResetScope) -> Result<(), StoreError> {
        match scope {
            ResetScope::Progress => self.progress.reset(),
            ResetScope::Stats => self.stats.reset(),
            ResetScope::Streak => self.streak.reset(),
            ResetScope::Bookmarks => self.bookmarks.reset(),
            ResetScope::Challenge => self.challenge.reset(),
            ResetScope::All => self.reset_all(),
        }
    }

    /// Reset every tracker
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        self.progress.reset()?;
        self.stats.reset()?;
        self.streak.reset()?;
        self.bookmarks.reset()?;
        self.challenge.reset()
    }
}
