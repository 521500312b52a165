//! Static course content
//!
//! The [`Catalog`] is an immutable, in-memory collection of lessons, glossary
//! terms, flashcards, error explanations, cheat-sheet entries, daily
//! challenges and tips. Trackers consult it to resolve ids but never mutate it.

pub mod model;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub use model::{
    CheatSheetItem, CheatSheetSection, DailyChallenge, DailyTip, Difficulty, ErrorEntry, Flashcard,
    GlossaryTerm, Lesson, LessonId, LessonSection, QuizQuestion,
};

/// Bundled course content
const BUNDLED_CATALOG: &str = include_str!("catalog.json");

/// Read-only content store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Lessons in display order
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    /// Glossary terms in display order
    #[serde(default)]
    pub terms: Vec<GlossaryTerm>,
    #[serde(default)]
    pub challenges: Vec<DailyChallenge>,
    #[serde(default)]
    pub tips: Vec<DailyTip>,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    /// Compiler error dictionary
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    #[serde(default)]
    pub cheat_sheet: Vec<CheatSheetSection>,
}

/// A search hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchHit<'a> {
    Lesson(&'a Lesson),
    Term(&'a GlossaryTerm),
    CheatSheet {
        section: &'a CheatSheetSection,
        item: &'a CheatSheetItem,
    },
}

impl Catalog {
    /// Build a catalog from lessons and terms only
    pub fn new(lessons: Vec<Lesson>, terms: Vec<GlossaryTerm>) -> Self {
        Self {
            lessons,
            terms,
            ..Default::default()
        }
    }

    /// The catalog shipped with the app
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse a catalog document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn terms(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    /// Find a lesson by id
    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Find a glossary term by its exact name
    pub fn term(&self, name: &str) -> Option<&GlossaryTerm> {
        self.terms.iter().find(|t| t.term == name)
    }

    pub fn total_lessons(&self) -> usize {
        self.lessons.len()
    }

    /// Case-insensitive substring search over lessons, glossary terms and the
    /// cheat sheet.
    ///
    /// Lessons match on title, subtitle or any section heading or body. Terms
    /// match on name, one-liner or analogy. Cheat-sheet items match on label or
    /// syntax. Hits come grouped in that order, each group in catalog order. A
    /// blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let matches = |text: &str| text.to_lowercase().contains(&query);

        let lessons = self
            .lessons
            .iter()
            .filter(|l| {
                let in_section = |s: &LessonSection| matches(&s.heading) || matches(&s.body);
                matches(&l.title) || matches(&l.subtitle) || l.sections.iter().any(in_section)
            })
            .map(SearchHit::Lesson);

        let terms = self
            .terms
            .iter()
            .filter(|t| matches(&t.term) || matches(&t.one_liner) || matches(&t.analogy))
            .map(SearchHit::Term);

        let cheat_sheet = self
            .cheat_sheet
            .iter()
            .flat_map(|section| {
                section
                    .items
                    .iter()
                    .filter(move |item| matches(&item.label) || matches(&item.syntax))
                    .map(move |item| SearchHit::CheatSheet { section, item })
            });

        lessons.chain(terms).chain(cheat_sheet).collect()
    }

    /// Flashcards in one category, or every card when `category` is `None`
    pub fn flashcards_in(&self, category: Option<&str>) -> Vec<&Flashcard> {
        self.flashcards
            .iter()
            .filter(|card| category.is_none_or(|c| card.category == c))
            .collect()
    }

    /// Distinct flashcard categories in first-seen order
    pub fn flashcard_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for card in &self.flashcards {
            if !categories.contains(&card.category.as_str()) {
                categories.push(&card.category);
            }
        }
        categories
    }

    /// Filter the error dictionary by message, explanation or fix.
    ///
    /// A blank query returns every entry.
    pub fn search_errors(&self, query: &str) -> Vec<&ErrorEntry> {
        let query = query.trim().to_lowercase();
        self.errors
            .iter()
            .filter(|e| {
                query.is_empty()
                    || e.error_message.to_lowercase().contains(&query)
                    || e.plain_english.to_lowercase().contains(&query)
                    || e.how_to_fix.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Today's challenge, rotating through the list by day of year
    pub fn challenge_for(&self, date: NaiveDate) -> Option<&DailyChallenge> {
        daily_index(date, self.challenges.len()).map(|i| &self.challenges[i])
    }

    /// Today's tip, rotating through the list by day of year
    pub fn tip_for(&self, date: NaiveDate) -> Option<&DailyTip> {
        daily_index(date, self.tips.len()).map(|i| &self.tips[i])
    }
}

/// Index of the item shown on `date` out of `len` rotating items.
///
/// Uses the 1-based day of the year, so the rotation restarts every January.
pub fn daily_index(date: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(date.ordinal() as usize % len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lesson(id: LessonId, title: &str, minutes: u32) -> Lesson {
        Lesson {
            id,
            title: title.into(),
            subtitle: format!("About {}", title),
            difficulty: Difficulty::Beginner,
            estimated_minutes: minutes,
            sections: Vec::new(),
            quiz: Vec::new(),
        }
    }

    fn term(name: &str, one_liner: &str) -> GlossaryTerm {
        GlossaryTerm {
            term: name.into(),
            category: "Basics".into(),
            one_liner: one_liner.into(),
            analogy: String::new(),
            code: None,
        }
    }

    fn card(category: &str, front: &str) -> Flashcard {
        Flashcard {
            category: category.into(),
            front: front.into(),
            back: String::new(),
        }
    }

    fn error(message: &str, fix: &str) -> ErrorEntry {
        ErrorEntry {
            error_message: message.into(),
            emoji: String::new(),
            plain_english: String::new(),
            why_it_happens: String::new(),
            how_to_fix: fix.into(),
            bad_code: None,
            good_code: None,
        }
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.total_lessons() > 0);
        assert!(!catalog.terms().is_empty());
        assert!(!catalog.challenges.is_empty());
        assert!(!catalog.tips.is_empty());
        assert!(!catalog.flashcards.is_empty());
        assert!(!catalog.errors.is_empty());
        assert!(!catalog.cheat_sheet.is_empty());
    }

    #[test]
    fn builtin_lesson_ids_are_unique() {
        let catalog = Catalog::builtin().unwrap();
        let mut ids: Vec<_> = catalog.lessons().iter().map(|l| l.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.total_lessons());
    }

    #[test]
    fn builtin_lessons_have_sections_and_valid_quizzes() {
        let catalog = Catalog::builtin().unwrap();
        for lesson in catalog.lessons() {
            let id = lesson.id;
            assert!(!lesson.sections.is_empty(), "lesson {} has no sections", id);
            assert!(!lesson.quiz.is_empty(), "lesson {} has no quiz", id);
            for q in &lesson.quiz {
                assert!(q.correct_index < q.options.len(), "bad answer in {}", id);
            }
        }
    }

    #[test]
    fn lookup_by_id_and_name() {
        let lessons = vec![lesson(3, "Loops", 7)];
        let catalog = Catalog::new(lessons, vec![term("guard", "Exit early")]);
        assert_eq!(catalog.lesson(3).unwrap().title, "Loops");
        assert!(catalog.lesson(99).is_none());
        assert!(catalog.term("guard").is_some());
        assert!(catalog.term("Guard").is_none());
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let catalog = Catalog::new(
            vec![lesson(1, "Loops", 7), lesson(2, "Functions", 8)],
            vec![
                term("for-in", "Loop over a sequence"),
                term("Bool", "True or false"),
            ],
        );

        let hits = catalog.search("LOOP");
        assert_eq!(hits.len(), 2);
        assert!(matches!(hits[0], SearchHit::Lesson(l) if l.id == 1));
        assert!(matches!(hits[1], SearchHit::Term(t) if t.term == "for-in"));
    }

    #[test]
    fn search_finds_term_by_analogy() {
        let mut optional = term("Optional", "A value that might be missing");
        optional.analogy = "Like a gift box that might be empty".into();
        let catalog = Catalog::new(Vec::new(), vec![optional, term("Int", "A whole number")]);

        let hits = catalog.search("gift box");
        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0], SearchHit::Term(t) if t.term == "Optional"));
    }

    #[test]
    fn search_looks_inside_lesson_sections() {
        let mut closures = lesson(9, "Closures", 10);
        closures.sections.push(LessonSection {
            heading: "Trailing syntax".into(),
            body: "Pass the last closure argument after the parentheses.".into(),
            code_example: None,
        });
        let catalog = Catalog::new(vec![lesson(1, "Loops", 7), closures], Vec::new());

        let by_heading = catalog.search("trailing");
        assert!(matches!(by_heading[..], [SearchHit::Lesson(l)] if l.id == 9));
        let by_body = catalog.search("parentheses");
        assert!(matches!(by_body[..], [SearchHit::Lesson(l)] if l.id == 9));
    }

    #[test]
    fn search_matches_cheat_sheet_label_and_syntax() {
        let mut catalog = Catalog::default();
        catalog.cheat_sheet.push(CheatSheetSection {
            title: "Optionals".into(),
            emoji: String::new(),
            items: vec![
                CheatSheetItem {
                    label: "Default value".into(),
                    syntax: "nick ?? \"Guest\"".into(),
                    note: None,
                },
                CheatSheetItem {
                    label: "Force unwrap".into(),
                    syntax: "nick!".into(),
                    note: Some("Crashes on nil".into()),
                },
            ],
        });

        let by_syntax = catalog.search("??");
        assert!(matches!(
            by_syntax[..],
            [SearchHit::CheatSheet { section, item }]
                if section.title == "Optionals" && item.label == "Default value"
        ));
        assert_eq!(catalog.search("force").len(), 1);
        // notes are not searched
        assert!(catalog.search("crashes").is_empty());
    }

    #[test]
    fn blank_search_matches_nothing() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn flashcards_filter_by_category() {
        let mut catalog = Catalog::default();
        catalog.flashcards = vec![
            card("Basics", "let?"),
            card("Optionals", "??"),
            card("Basics", "var?"),
        ];

        let basics: Vec<_> = catalog
            .flashcards_in(Some("Basics"))
            .into_iter()
            .map(|c| c.front.as_str())
            .collect();
        assert_eq!(basics, vec!["let?", "var?"]);
        assert_eq!(catalog.flashcards_in(None).len(), 3);
        assert!(catalog.flashcards_in(Some("Closures")).is_empty());
        assert_eq!(catalog.flashcard_categories(), vec!["Basics", "Optionals"]);
    }

    #[test]
    fn error_search_filters_by_message_and_fix() {
        let mut catalog = Catalog::default();
        catalog.errors = vec![
            error("Index out of range", "Check the array count first"),
            error("Cannot find 'x' in scope", "Fix the spelling"),
        ];

        assert_eq!(catalog.search_errors("SCOPE").len(), 1);
        let by_fix = catalog.search_errors("array count");
        assert_eq!(by_fix[0].error_message, "Index out of range");
        assert!(catalog.search_errors("segfault").is_empty());
        assert_eq!(catalog.search_errors("").len(), 2);
    }

    #[test]
    fn daily_index_rotates_by_day_of_year() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(daily_index(jan1, 5), Some(1));
        assert_eq!(daily_index(jan2, 5), Some(2));
        assert_eq!(daily_index(jan1, 0), None);
    }

    #[test]
    fn empty_catalog_has_no_daily_content() {
        let catalog = Catalog::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(catalog.challenge_for(today).is_none());
        assert!(catalog.tip_for(today).is_none());
    }
}
