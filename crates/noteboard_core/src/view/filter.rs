//! Note filtering and ordering.
//!
//! # Responsibility
//! - Derive the visible, ordered note list from raw notes plus filters.
//!
//! # Invariants
//! - Output is a pure function of the inputs (no clock, no globals).
//! - Order is total: `pinned DESC, edited_timestamp DESC, title ASC
//!   (case-insensitive), uuid ASC`.
//! - Filtering twice with the same criteria is a no-op after the first pass.

use crate::model::note::Note;
use std::cmp::Ordering;

/// Tag filter value meaning "do not filter by tag".
pub const ALL_TAGS: &str = "all";

/// User-entered filter inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against title and preview.
    pub search_term: String,
    /// Tag `uuid`, or [`ALL_TAGS`].
    pub selected_tag: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_tag: ALL_TAGS.to_string(),
        }
    }
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, selected_tag: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            selected_tag: selected_tag.into(),
        }
    }

    /// Whether a search term is in effect.
    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Whether a tag filter is in effect.
    pub fn has_tag_filter(&self) -> bool {
        self.selected_tag != ALL_TAGS
    }

    /// Whether any filter can remove notes from the list.
    pub fn is_active(&self) -> bool {
        self.has_search() || self.has_tag_filter()
    }

    /// Applies these criteria with [`filter_and_sort`].
    pub fn apply(&self, notes: &[Note]) -> Vec<Note> {
        filter_and_sort(notes, &self.search_term, &self.selected_tag)
    }
}

/// Filters `notes` by tag and search term, then sorts them for display.
///
/// - `selected_tag == "all"` disables tag filtering; any other value keeps
///   only notes carrying a tag with that `uuid`. A value naming no existing
///   tag yields an empty list.
/// - An empty `search_term` disables search filtering; otherwise the term is
///   matched case-insensitively against `title` and `preview`.
pub fn filter_and_sort(notes: &[Note], search_term: &str, selected_tag: &str) -> Vec<Note> {
    let needle = search_term.to_lowercase();
    let mut visible = notes
        .iter()
        .filter(|note| selected_tag == ALL_TAGS || note.has_tag(selected_tag))
        .filter(|note| needle.is_empty() || matches_search(note, &needle))
        .cloned()
        .collect::<Vec<_>>();

    visible.sort_by(compare_for_display);
    visible
}

/// Display ordering for notes.
pub fn compare_for_display(a: &Note, b: &Note) -> Ordering {
    b.pinned
        .cmp(&a.pinned)
        .then_with(|| b.edited_timestamp.cmp(&a.edited_timestamp))
        .then_with(|| compare_titles(&a.title, &b.title))
        .then_with(|| a.uuid.cmp(&b.uuid))
}

// Case folded first; raw comparison keeps "a" and "A" in a fixed order.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn matches_search(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle) || note.preview.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{filter_and_sort, FilterCriteria, ALL_TAGS};
    use crate::model::note::{Note, Tag};

    fn note(id: &str, title: &str, pinned: bool, ts: i64) -> Note {
        let mut note = Note::with_id(id, title, ts);
        note.pinned = pinned;
        note
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|note| note.title.as_str()).collect()
    }

    #[test]
    fn pinned_first_then_title_for_equal_timestamps() {
        let notes = vec![
            note("b", "B", false, 100),
            note("a", "A", true, 50),
            note("c", "C", true, 50),
        ];
        let ordered = filter_and_sort(&notes, "", ALL_TAGS);
        assert_eq!(titles(&ordered), vec!["A", "C", "B"]);
    }

    #[test]
    fn newer_edits_come_first_within_group() {
        let notes = vec![
            note("1", "old", false, 10),
            note("2", "new", false, 30),
            note("3", "mid", false, 20),
        ];
        let ordered = filter_and_sort(&notes, "", ALL_TAGS);
        assert_eq!(titles(&ordered), vec!["new", "mid", "old"]);
    }

    #[test]
    fn title_tie_break_ignores_case() {
        let notes = vec![
            note("1", "banana", false, 5),
            note("2", "Apple", false, 5),
            note("3", "cherry", false, 5),
        ];
        let ordered = filter_and_sort(&notes, "", ALL_TAGS);
        assert_eq!(titles(&ordered), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn search_matches_title_or_preview_case_insensitively() {
        let mut with_preview = note("1", "groceries", false, 1);
        with_preview.preview = "Buy MILK and eggs".to_string();
        let notes = vec![with_preview, note("2", "Milkshake recipe", false, 2), note("3", "other", false, 3)];

        let ordered = filter_and_sort(&notes, "milk", ALL_TAGS);
        assert_eq!(titles(&ordered), vec!["Milkshake recipe", "groceries"]);
    }

    #[test]
    fn non_matching_search_returns_empty() {
        let notes = vec![note("1", "alpha", false, 1), note("2", "beta", true, 2)];
        assert!(filter_and_sort(&notes, "zz", ALL_TAGS).is_empty());
    }

    #[test]
    fn tag_filter_matches_uuid_not_name() {
        let mut tagged = note("1", "tagged", false, 1);
        tagged.tags = vec![Tag::new("tag-work", "Work")];
        let notes = vec![tagged, note("2", "untagged", false, 2)];

        assert_eq!(titles(&filter_and_sort(&notes, "", "tag-work")), vec!["tagged"]);
        assert!(filter_and_sort(&notes, "", "Work").is_empty());
    }

    #[test]
    fn unknown_tag_degrades_to_empty_result() {
        let notes = vec![note("1", "a", false, 1)];
        assert!(filter_and_sort(&notes, "", "deleted-tag").is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut tagged = note("1", "Plan trip", true, 4);
        tagged.tags = vec![Tag::new("t", "travel")];
        let mut second = note("2", "trip budget", false, 9);
        second.tags = vec![Tag::new("t", "travel")];
        let notes = vec![second, tagged, note("3", "trip", false, 9)];

        let once = filter_and_sort(&notes, "TRIP", "t");
        let twice = filter_and_sort(&once, "TRIP", "t");
        assert_eq!(once, twice);
    }

    #[test]
    fn input_order_does_not_change_output() {
        let forward = vec![
            note("1", "x", false, 7),
            note("2", "X", false, 7),
            note("3", "y", true, 7),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(
            filter_and_sort(&forward, "", ALL_TAGS),
            filter_and_sort(&reversed, "", ALL_TAGS)
        );
    }

    #[test]
    fn criteria_activity_flags() {
        assert!(!FilterCriteria::default().is_active());
        assert!(FilterCriteria::new("q", ALL_TAGS).is_active());
        assert!(FilterCriteria::new("", "tag").is_active());
    }
}
