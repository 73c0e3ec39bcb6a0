//! Screen-scoped multi-select state.
//!
//! # Responsibility
//! - Hold the ordered set of notes marked for bulk action.
//! - Offer toggle/clear mutations and membership/count queries.
//!
//! # Invariants
//! - No `uuid` appears twice.
//! - Insertion order is retained for deterministic display.
//! - `toggle` applied twice with the same note restores the previous state.
//!   Store equality is set membership; re-selecting a note appends it last.
//!
//! Clearing on focus transitions is owned by the controller, not this store.

use crate::model::note::Note;
use std::collections::{HashMap, HashSet};

/// Ordered selection set with O(1) membership checks.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    items: Vec<Note>,
    ids: HashSet<String>,
}

impl PartialEq for SelectionStore {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for SelectionStore {}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `note` when selected, appends it otherwise.
    ///
    /// Returns `true` when the note is selected after the call.
    pub fn toggle(&mut self, note: &Note) -> bool {
        if self.ids.remove(note.uuid.as_str()) {
            self.items.retain(|item| item.uuid != note.uuid);
            false
        } else {
            self.ids.insert(note.uuid.clone());
            self.items.push(note.clone());
            true
        }
    }

    /// Empties the set unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    pub fn is_selected(&self, uuid: &str) -> bool {
        self.ids.contains(uuid)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether selection mode should be shown (`count() > 0`).
    pub fn is_active(&self) -> bool {
        !self.items.is_empty()
    }

    /// Selected notes in insertion order.
    pub fn selected(&self) -> &[Note] {
        &self.items
    }

    /// Selected note ids in insertion order.
    pub fn selected_ids(&self) -> Vec<&str> {
        self.items.iter().map(Note::key).collect()
    }

    /// Drops selections whose notes are absent from `notes` and replaces the
    /// remaining entries with their values from `notes`.
    ///
    /// Returns how many entries were removed.
    pub fn retain_present(&mut self, notes: &[Note]) -> usize {
        let fresh = notes
            .iter()
            .map(|note| (note.uuid.as_str(), note))
            .collect::<HashMap<_, _>>();
        let before = self.items.len();
        self.items = self
            .items
            .iter()
            .filter_map(|item| fresh.get(item.uuid.as_str()).map(|note| (*note).clone()))
            .collect();
        self.ids.retain(|id| fresh.contains_key(id.as_str()));
        before - self.items.len()
    }
}
