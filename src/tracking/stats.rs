//! Cumulative quiz statistics

use std::rc::Rc;

use super::ProgressTracker;
use crate::content::Catalog;
use crate::store::{KeyValueStore, SharedStore, StoreError, read_counter};

const QUIZZES_KEY: &str = "statsTotalQuizzes";
const CORRECT_KEY: &str = "statsTotalCorrect";
const ANSWERED_KEY: &str = "statsTotalAnswered";

/// Lifetime quiz counters. All three only ever grow until a reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizStatistics {
    pub quizzes_taken: u32,
    pub correct_answers: u32,
    /// Every answered question, right or wrong
    pub questions_answered: u32,
}

impl QuizStatistics {
    /// Share of answers that were correct, in `[0, 100]`; 0 before any quiz
    pub fn accuracy_percent(&self) -> f64 {
        if self.questions_answered == 0 {
            return 0.0;
        }
        f64::from(self.correct_answers) / f64::from(self.questions_answered) * 100.0
    }
}

/// Owns the lifetime quiz counters
pub struct StatsTracker {
    store: SharedStore,
    catalog: Rc<Catalog>,
    stats: QuizStatistics,
}

impl StatsTracker {
    pub fn load(store: SharedStore, catalog: Rc<Catalog>) -> Result<Self, StoreError> {
        let stats = QuizStatistics {
            quizzes_taken: read_counter(store.as_ref(), QUIZZES_KEY)?,
            correct_answers: read_counter(store.as_ref(), CORRECT_KEY)?,
            questions_answered: read_counter(store.as_ref(), ANSWERED_KEY)?,
        };
        Ok(Self {
            store,
            catalog,
            stats,
        })
    }

    /// Record one finished quiz attempt, passed or not.
    ///
    /// Callers guarantee `correct <= total`; the counts are not checked.
    pub fn record_quiz(&mut self, correct: u32, total: u32) -> Result<(), StoreError> {
        self.stats.quizzes_taken = self.stats.quizzes_taken.saturating_add(1);
        self.stats.correct_answers = self.stats.correct_answers.saturating_add(correct);
        self.stats.questions_answered = self.stats.questions_answered.saturating_add(total);
        tracing::debug!("Recorded quiz: {}/{} correct", correct, total);

        self.store.set_int(QUIZZES_KEY, i64::from(self.stats.quizzes_taken))?;
        self.store.set_int(CORRECT_KEY, i64::from(self.stats.correct_answers))?;
        self.store.set_int(ANSWERED_KEY, i64::from(self.stats.questions_answered))
    }

    pub fn statistics(&self) -> QuizStatistics {
        self.stats
    }

    pub fn quizzes_taken(&self) -> u32 {
        self.stats.quizzes_taken
    }

    pub fn correct_answers(&self) -> u32 {
        self.stats.correct_answers
    }

    pub fn questions_answered(&self) -> u32 {
        self.stats.questions_answered
    }

    pub fn accuracy_percent(&self) -> f64 {
        self.stats.accuracy_percent()
    }

    /// Sum of estimated minutes over completed lessons still in the catalog.
    ///
    /// Recomputed on every call from the live completed set.
    pub fn estimated_minutes_learned(&self, progress: &ProgressTracker) -> u32 {
        progress
            .completed_ids()
            .filter_map(|id| self.catalog.lesson(id))
            .map(|lesson| lesson.estimated_minutes)
            .sum()
    }

    /// Zero every counter and erase the stored records
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.stats = QuizStatistics::default();
        tracing::info!("Quiz statistics reset");
        self.store.remove(QUIZZES_KEY)?;
        self.store.remove(CORRECT_KEY)?;
        self.store.remove(ANSWERED_KEY)
    }
}
