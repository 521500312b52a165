//! Profile summary

use std::fmt;

/// Point-in-time view over every tracker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub progress_fraction: f64,
    pub quizzes_taken: u32,
    pub accuracy_percent: f64,
    pub minutes_learned: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub checked_in_today: bool,
    pub bookmarked_lessons: usize,
    pub bookmarked_terms: usize,
    pub challenge_done_today: bool,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Lessons    {}/{} ({:.0}%)",
            self.completed_lessons,
            self.total_lessons,
            self.progress_fraction * 100.0
        )?;
        writeln!(
            f,
            "Quizzes    {} taken, {:.0}% accuracy",
            self.quizzes_taken, self.accuracy_percent
        )?;
        writeln!(f, "Learned    ~{} min", self.minutes_learned)?;

        let pending = if self.checked_in_today {
            ""
        } else {
            " - not checked in today"
        };
        writeln!(
            f,
            "Streak     {} day{} (best {}){}",
            self.current_streak,
            if self.current_streak == 1 { "" } else { "s" },
            self.longest_streak,
            pending
        )?;
        writeln!(
            f,
            "Bookmarks  {} lessons, {} terms",
            self.bookmarked_lessons, self.bookmarked_terms
        )?;

        let challenge = if self.challenge_done_today {
            "done for today"
        } else {
            "waiting"
        };
        write!(f, "Challenge  {}", challenge)
    }
}
