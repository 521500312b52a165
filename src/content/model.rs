//! Content model for the course
//!
//! Lessons, glossary terms, flashcards, error explanations, cheat-sheet
//! entries, daily challenges and tips are static, read-only data. Lessons are
//! keyed by a stable integer id, glossary terms by their display name.

use serde::{Deserialize, Serialize};

/// Stable lesson identifier
pub type LessonId = u32;

/// Difficulty level of a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
        }
    }
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the right answer
    pub correct_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// Whether `answer` picks the correct option
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }
}

/// A single lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique identifier across the catalog
    pub id: LessonId,
    pub title: String,
    pub subtitle: String,
    pub difficulty: Difficulty,
    /// Estimated reading time
    pub estimated_minutes: u32,
    #[serde(default)]
    pub sections: Vec<LessonSection>,
    /// Quiz that unlocks completion
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

/// One heading and its explanation inside a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSection {
    pub heading: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
}

/// A plain-English glossary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    /// Display name, doubles as the key
    pub term: String,
    pub category: String,
    pub one_liner: String,
    pub analogy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// The question of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
    pub difficulty: String,
}

impl DailyChallenge {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }
}

/// Tip of the day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTip {
    pub text: String,
    pub category: String,
}

/// A two-sided review card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub category: String,
    /// The prompt
    pub front: String,
    /// The answer
    pub back: String,
}

/// A compiler error explained in plain English
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// The message exactly as the compiler prints it
    pub error_message: String,
    pub emoji: String,
    pub plain_english: String,
    pub why_it_happens: String,
    pub how_to_fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatSheetItem {
    pub label: String,
    pub syntax: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A titled group of syntax reminders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatSheetSection {
    pub title: String,
    pub emoji: String,
    pub items: Vec<CheatSheetItem>,
}
