//! Lesson and glossary bookmarks

use std::collections::BTreeSet;
use std::rc::Rc;

use super::{load_lesson_ids, save_lesson_ids};
use crate::content::{Catalog, GlossaryTerm, Lesson, LessonId};
use crate::store::{KeyValueStore, SharedStore, StoreError};

const LESSONS_KEY: &str = "bookmarkedLessonIDs";
const TERMS_KEY: &str = "bookmarkedTermNames";

/// Owns the bookmarked lesson ids and glossary term names
pub struct BookmarkTracker {
    store: SharedStore,
    catalog: Rc<Catalog>,
    lessons: BTreeSet<LessonId>,
    terms: BTreeSet<String>,
}

impl BookmarkTracker {
    pub fn load(store: SharedStore, catalog: Rc<Catalog>) -> Result<Self, StoreError> {
        let lessons = load_lesson_ids(store.as_ref(), LESSONS_KEY)?;
        let terms: BTreeSet<String> = store
            .get_string_list(TERMS_KEY)?
            .unwrap_or_default()
            .into_iter()
            .collect();
        Ok(Self {
            store,
            catalog,
            lessons,
            terms,
        })
    }

    // Lessons

    /// Flip the bookmark on a lesson; returns whether it is now bookmarked
    pub fn toggle_lesson(&mut self, lesson_id: LessonId) -> Result<bool, StoreError> {
        let bookmarked = toggle(&mut self.lessons, lesson_id);
        tracing::debug!("Lesson {} bookmarked: {}", lesson_id, bookmarked);
        save_lesson_ids(self.store.as_ref(), LESSONS_KEY, &self.lessons)?;
        Ok(bookmarked)
    }

    pub fn is_lesson_bookmarked(&self, lesson_id: LessonId) -> bool {
        self.lessons.contains(&lesson_id)
    }

    /// Bookmarked lessons in catalog order; stale ids are skipped
    pub fn bookmarked_lessons(&self) -> Vec<&Lesson> {
        self.catalog
            .lessons()
            .iter()
            .filter(|l| self.lessons.contains(&l.id))
            .collect()
    }

    // Terms

    /// Flip the bookmark on a glossary term; returns whether it is now bookmarked
    pub fn toggle_term(&mut self, name: &str) -> Result<bool, StoreError> {
        let bookmarked = toggle(&mut self.terms, name.to_string());
        tracing::debug!("Term '{}' bookmarked: {}", name, bookmarked);
        self.store.set_string_list(TERMS_KEY, self.terms.iter().cloned().collect())?;
        Ok(bookmarked)
    }

    pub fn is_term_bookmarked(&self, name: &str) -> bool {
        self.terms.contains(name)
    }

    /// Bookmarked terms in catalog order; unknown names are skipped
    pub fn bookmarked_terms(&self) -> Vec<&GlossaryTerm> {
        self.catalog
            .terms()
            .iter()
            .filter(|t| self.terms.contains(&t.term))
            .collect()
    }

    /// Empty both sets and erase the stored records
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.lessons.clear();
        self.terms.clear();
        tracing::info!("Bookmarks reset");
        self.store.remove(LESSONS_KEY)?;
        self.store.remove(TERMS_KEY)
    }
}

/// Insert if absent, remove if present; returns membership afterwards
fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Difficulty;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn catalog() -> Rc<Catalog> {
        let lessons = [3, 1, 2]
            .into_iter()
            .map(|id| Lesson {
                id,
                title: format!("Lesson {}", id),
                subtitle: String::new(),
                difficulty: Difficulty::Beginner,
                estimated_minutes: 5,
                sections: Vec::new(),
                quiz: Vec::new(),
            })
            .collect();
        let terms = ["Variable", "Constant", "guard"]
            .into_iter()
            .map(|name| GlossaryTerm {
                term: name.into(),
                category: "Basics".into(),
                one_liner: String::new(),
                analogy: String::new(),
                code: None,
            })
            .collect();
        Rc::new(Catalog::new(lessons, terms))
    }

    fn tracker(store: &MemoryStore) -> BookmarkTracker {
        BookmarkTracker::load(Rc::new(store.clone()), catalog()).unwrap()
    }

    #[test]
    fn toggle_lesson_flips_and_persists() {
        let store = MemoryStore::default();
        let mut bookmarks = tracker(&store);

        assert!(bookmarks.toggle_lesson(2).unwrap());
        assert!(bookmarks.is_lesson_bookmarked(2));
        assert_eq!(store.get_int_list(LESSONS_KEY).unwrap(), Some(vec![2]));

        assert!(!bookmarks.toggle_lesson(2).unwrap());
        assert!(!bookmarks.is_lesson_bookmarked(2));
        assert_eq!(store.get_int_list(LESSONS_KEY).unwrap(), Some(vec![]));
    }

    #[test]
    fn bookmarked_lessons_follow_catalog_order() {
        let store = MemoryStore::default();
        let mut bookmarks = tracker(&store);
        bookmarks.toggle_lesson(2).unwrap();
        bookmarks.toggle_lesson(3).unwrap();
        bookmarks.toggle_lesson(77).unwrap();

        let ids: Vec<_> = bookmarks
            .bookmarked_lessons()
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn bookmarked_terms_skip_unknown_names() {
        let store = MemoryStore::default();
        let mut bookmarks = tracker(&store);
        bookmarks.toggle_term("guard").unwrap();
        bookmarks.toggle_term("Variable").unwrap();
        bookmarks.toggle_term("Monad").unwrap();

        let names: Vec<_> = bookmarks
            .bookmarked_terms()
            .iter()
            .map(|t| t.term.as_str())
            .collect();
        assert_eq!(names, vec!["Variable", "guard"]);
        assert!(bookmarks.is_term_bookmarked("Monad"));
    }

    #[test]
    fn bookmarks_survive_restart() {
        let store = MemoryStore::default();
        let mut bookmarks = tracker(&store);
        bookmarks.toggle_lesson(1).unwrap();
        bookmarks.toggle_term("Constant").unwrap();

        let restarted = tracker(&store);
        assert!(restarted.is_lesson_bookmarked(1));
        assert!(restarted.is_term_bookmarked("Constant"));
    }

    #[test]
    fn reset_erases_both_sets() {
        let store = MemoryStore::default();
        let mut bookmarks = tracker(&store);
        bookmarks.toggle_lesson(1).unwrap();
        bookmarks.toggle_term("Constant").unwrap();

        bookmarks.reset().unwrap();

        assert!(bookmarks.bookmarked_lessons().is_empty());
        assert!(bookmarks.bookmarked_terms().is_empty());
        assert!(!store.contains(LESSONS_KEY).unwrap());
        assert!(!store.contains(TERMS_KEY).unwrap());
        assert!(!tracker(&store).is_lesson_bookmarked(1));
    }

    proptest! {
        #[test]
        fn toggle_parity_decides_membership(id in 0u32..10, times in 1usize..8, start in any::<bool>()) {
            let store = MemoryStore::default();
            let mut bookmarks = tracker(&store);
            if start {
                bookmarks.toggle_lesson(id).unwrap();
            }

            for _ in 0..times {
                bookmarks.toggle_lesson(id).unwrap();
            }

            prop_assert_eq!(bookmarks.is_lesson_bookmarked(id), start ^ (times % 2 == 1));
        }

        #[test]
        fn resolved_lessons_exist_in_catalog(ids in prop::collection::vec(0u32..10, 0..15)) {
            let store = MemoryStore::default();
            let mut bookmarks = tracker(&store);
            for id in ids {
                bookmarks.toggle_lesson(id).unwrap();
            }

            let catalog = catalog();
            for lesson in bookmarks.bookmarked_lessons() {
                prop_assert!(catalog.lesson(lesson.id).is_some());
            }
        }
    }
}
