//! Lesson quiz grading
//!
//! A finished quiz always counts towards the lifetime statistics; passing it
//! also marks the lesson as completed.

use thiserror::Error;

use crate::content::{Lesson, LessonId};
use crate::store::StoreError;
use crate::tracking::{ProgressTracker, StatsTracker};

/// Share of questions that must be answered correctly to pass
pub const DEFAULT_PASSING_RATIO: f64 = 0.6;

/// Minimum number of correct answers needed to pass `total` questions
pub fn passing_score(total: u32, ratio: f64) -> u32 {
    (f64::from(total) * ratio).ceil() as u32
}

/// Submitted answers that cannot be graded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    #[error("Expected {expected} answers, one per question, got {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("Answer {answer} to question {question} is not an option (choose 1-{options})")]
    OutOfRange {
        question: usize,
        answer: usize,
        options: usize,
    },
}

/// Index of the option picked by a 1-based option `number`, if it exists
pub fn option_index(number: usize, options: usize) -> Option<usize> {
    number.checked_sub(1).filter(|&index| index < options)
}

/// Turn 1-based option numbers, one per question, into option indices.
///
/// Nothing is graded unless every question has exactly one valid answer.
pub fn answer_indices(lesson: &Lesson, numbers: &[usize]) -> Result<Vec<usize>, AnswerError> {
    if numbers.len() != lesson.quiz.len() {
        return Err(AnswerError::WrongCount {
            expected: lesson.quiz.len(),
            found: numbers.len(),
        });
    }

    lesson
        .quiz
        .iter()
        .zip(numbers)
        .enumerate()
        .map(|(i, (question, &answer))| {
            option_index(answer, question.options.len()).ok_or(AnswerError::OutOfRange {
                question: i + 1,
                answer,
                options: question.options.len(),
            })
        })
        .collect()
}

/// Result of one finished quiz attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub lesson_id: LessonId,
    pub correct: u32,
    pub total: u32,
}

impl QuizOutcome {
    /// Grade `answers` (option indices, in question order) against a lesson's quiz.
    ///
    /// Missing answers count as wrong; extra answers are ignored.
    pub fn grade(lesson: &Lesson, answers: &[usize]) -> Self {
        let correct = lesson
            .quiz
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.is_correct(**answer))
            .count();

        Self {
            lesson_id: lesson.id,
            correct: correct as u32,
            total: lesson.quiz.len() as u32,
        }
    }

    pub fn passed(&self, ratio: f64) -> bool {
        self.correct >= passing_score(self.total, ratio)
    }
}

/// Apply a finished quiz to the trackers. Returns whether the quiz was passed.
pub fn finish_quiz(
    progress: &mut ProgressTracker,
    stats: &mut StatsTracker,
    outcome: QuizOutcome,
    ratio: f64,
) -> Result<bool, StoreError> {
    let passed = outcome.passed(ratio);
    if passed {
        progress.mark_completed(outcome.lesson_id)?;
    }
    stats.record_quiz(outcome.correct, outcome.total)?;
    Ok(passed)
}
