//! Persisted view preferences.
//!
//! # Responsibility
//! - Define the key/value surface used to persist list view preferences.
//! - Read `ViewPreferences` with defaults for missing or malformed values.
//!
//! # Invariants
//! - The view engine only reads preferences; writes come from screen chrome
//!   (search bar, tag picker, layout toggle).
//! - Missing keys map to defaults: empty search, `"all"` tags, list view.

use crate::repo::RepoResult;
use crate::view::filter::{FilterCriteria, ALL_TAGS};
use log::warn;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Key holding the current search term.
pub const SEARCH_TERM_KEY: &str = "notesSearchTerm";
/// Key holding the selected tag uuid (or `"all"`).
pub const SELECTED_TAG_KEY: &str = "notesSelectedTag";
/// Key holding the grid/list layout flag.
pub const GRID_VIEW_KEY: &str = "notesGridView";

/// Process-wide string/boolean key-value store.
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_string(&self, key: &str, value: &str) -> RepoResult<()>;

    fn get_bool(&self, key: &str) -> RepoResult<Option<bool>> {
        Ok(self.get_string(key)?.and_then(|value| parse_bool(key, &value)))
    }

    fn set_bool(&self, key: &str, value: bool) -> RepoResult<()> {
        self.set_string(key, if value { "true" } else { "false" })
    }
}

/// Snapshot of list view preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewPreferences {
    pub search_term: String,
    pub selected_tag: String,
    pub is_grid_view: bool,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            selected_tag: ALL_TAGS.to_string(),
            is_grid_view: false,
        }
    }
}

impl ViewPreferences {
    /// Reads the current preferences, applying defaults for missing keys.
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> RepoResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            search_term: store
                .get_string(SEARCH_TERM_KEY)?
                .unwrap_or(defaults.search_term),
            selected_tag: store
                .get_string(SELECTED_TAG_KEY)?
                .unwrap_or(defaults.selected_tag),
            is_grid_view: store
                .get_bool(GRID_VIEW_KEY)?
                .unwrap_or(defaults.is_grid_view),
        })
    }

    /// Filter inputs carried by these preferences.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.search_term.clone(), self.selected_tag.clone())
    }
}

/// Flips the persisted layout flag and returns the new value.
pub fn toggle_grid_view<S: PreferenceStore + ?Sized>(store: &S) -> RepoResult<bool> {
    let next = !store.get_bool(GRID_VIEW_KEY)?.unwrap_or(false);
    store.set_bool(GRID_VIEW_KEY, next)?;
    Ok(next)
}

/// In-memory store for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_string(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> RepoResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => {
            warn!("event=prefs_read module=prefs status=invalid key={key} reason=not_a_bool");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        toggle_grid_view, MemoryPreferenceStore, PreferenceStore, ViewPreferences, GRID_VIEW_KEY,
        SEARCH_TERM_KEY, SELECTED_TAG_KEY,
    };

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let store = MemoryPreferenceStore::new();
        let prefs = ViewPreferences::load(&store).unwrap();
        assert_eq!(prefs, ViewPreferences::default());
        assert_eq!(prefs.selected_tag, "all");
        assert!(!prefs.criteria().is_active());
    }

    #[test]
    fn stored_values_are_read_back() {
        let store = MemoryPreferenceStore::new();
        store.set_string(SEARCH_TERM_KEY, "trip").unwrap();
        store.set_string(SELECTED_TAG_KEY, "tag-1").unwrap();
        store.set_bool(GRID_VIEW_KEY, true).unwrap();

        let prefs = ViewPreferences::load(&store).unwrap();
        assert_eq!(prefs.search_term, "trip");
        assert_eq!(prefs.selected_tag, "tag-1");
        assert!(prefs.is_grid_view);
    }

    #[test]
    fn malformed_bool_is_treated_as_missing() {
        let store = MemoryPreferenceStore::new();
        store.set_string(GRID_VIEW_KEY, "maybe").unwrap();
        assert!(!ViewPreferences::load(&store).unwrap().is_grid_view);
    }

    #[test]
    fn toggle_grid_view_flips_persisted_flag() {
        let store = MemoryPreferenceStore::new();
        assert!(toggle_grid_view(&store).unwrap());
        assert!(!toggle_grid_view(&store).unwrap());
        assert_eq!(store.get_bool(GRID_VIEW_KEY).unwrap(), Some(false));
    }
}
