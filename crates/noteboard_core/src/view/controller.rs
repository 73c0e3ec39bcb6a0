//! Notes screen view controller.
//!
//! # Responsibility
//! - Hold the last fetched note/tag collections and their fetch status.
//! - Derive the visible list (and grid columns) from preferences, memoized.
//! - Own the screen-scoped selection and clear it on focus transitions.
//! - Route navigation and note creation through the connectivity checks.
//!
//! # Invariants
//! - A successful refresh replaces the whole collection; a failed one keeps
//!   the previous collection untouched.
//! - The derived list is recomputed only when notes, search term, tag filter,
//!   layout or column policy change.
//! - Selection is empty right after `on_focus` and `on_blur`.

use crate::model::note::{Note, NoteId, NoteType, Tag};
use crate::prefs::ViewPreferences;
use crate::source::{
    NoteCreator, NoteSource, QueryStatus, SourceError, SourceResult, TagSource,
};
use crate::view::columns::{partition_with, ColumnPolicy, Columns};
use crate::view::filter::FilterCriteria;
use crate::view::guard::{can_open, Connectivity, ContentCache, NavigationDecision};
use crate::view::selection::SelectionStore;
use log::{debug, info, warn};
use std::collections::HashSet;

const DEFAULT_TAG_CHIP_LIMIT: usize = 3;

/// Screen-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Column assignment used in grid view.
    pub column_policy: ColumnPolicy,
    /// Maximum tag chips shown per card.
    pub tag_chip_limit: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            column_policy: ColumnPolicy::default(),
            tag_chip_limit: DEFAULT_TAG_CHIP_LIMIT,
        }
    }
}

/// Derived output handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesView<'a> {
    /// Single ordered list.
    List(&'a [Note]),
    /// Two ordered columns for grid (masonry) layout.
    Columns {
        left: &'a [Note],
        right: &'a [Note],
    },
}

impl NotesView<'_> {
    /// Number of notes rendered across the whole view.
    pub fn len(&self) -> usize {
        match self {
            Self::List(notes) => notes.len(),
            Self::Columns { left, right } => left.len() + right.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Placeholder shown instead of an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// First fetch still running.
    Loading,
    /// Fetch failed and nothing was loaded before.
    Error,
    /// No notes exist.
    Empty,
    /// Notes exist but the active filters matched none of them.
    EmptySearch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderKey {
    revision: u64,
    criteria: FilterCriteria,
}

#[derive(Debug)]
struct Derived {
    key: OrderKey,
    ordered: Vec<Note>,
    columns: Option<(ColumnPolicy, Columns)>,
}

/// Composition root for the notes list screen.
#[derive(Debug, Default)]
pub struct NotesViewController {
    config: ScreenConfig,
    selection: SelectionStore,
    notes: Vec<Note>,
    tags: Vec<Tag>,
    notes_status: QueryStatus,
    tags_status: QueryStatus,
    last_error: Option<SourceError>,
    revision: u64,
    derived: Option<Derived>,
    derivations: u64,
}

impl NotesViewController {
    pub fn new(config: ScreenConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> ScreenConfig {
        self.config
    }

    /// Screen gained focus.
    pub fn on_focus(&mut self) {
        self.reset_selection("focus");
    }

    /// Screen lost focus.
    pub fn on_blur(&mut self) {
        self.reset_selection("blur");
    }

    fn reset_selection(&mut self, transition: &str) {
        let cleared = self.selection.count();
        self.selection.clear();
        debug!("event=selection_reset module=view status=ok transition={transition} cleared={cleared}");
    }

    /// Marks a refresh as in flight. The current collection stays visible.
    pub fn begin_refresh(&mut self) {
        self.notes_status = QueryStatus::Loading;
        self.tags_status = QueryStatus::Loading;
    }

    /// Applies one note fetch outcome.
    ///
    /// On success the collection is replaced and selections of vanished
    /// notes are dropped. On error the previous collection is kept.
    pub fn apply_notes_result(&mut self, result: SourceResult<Vec<Note>>) {
        match result {
            Ok(notes) => {
                let dropped = self.selection.retain_present(&notes);
                info!(
                    "event=notes_refresh module=view status=ok count={} revision={} selection_dropped={dropped}",
                    notes.len(),
                    self.revision + 1
                );
                self.notes = notes;
                self.revision += 1;
                self.notes_status = QueryStatus::Success;
                self.last_error = None;
            }
            Err(err) => {
                warn!(
                    "event=notes_refresh module=view status=error error_code={} kept={}",
                    err.code(),
                    self.notes.len()
                );
                self.notes_status = QueryStatus::Error;
                self.last_error = Some(err);
            }
        }
    }

    /// Applies one tag fetch outcome. On error the previous tags are kept.
    pub fn apply_tags_result(&mut self, result: SourceResult<Vec<Tag>>) {
        match result {
            Ok(mut tags) => {
                let mut seen = HashSet::new();
                tags.retain(|tag| seen.insert(tag.uuid.clone()));
                tags.sort_by(|a, b| {
                    a.name
                        .to_lowercase()
                        .cmp(&b.name.to_lowercase())
                        .then_with(|| a.uuid.cmp(&b.uuid))
                });
                self.tags = tags;
                self.tags_status = QueryStatus::Success;
            }
            Err(err) => {
                warn!(
                    "event=tags_refresh module=view status=error error_code={} kept={}",
                    err.code(),
                    self.tags.len()
                );
                self.tags_status = QueryStatus::Error;
            }
        }
    }

    /// Fetches notes and tags, applying both outcomes.
    ///
    /// Returns the first failure so the caller can alert; state is updated
    /// for both sources either way.
    pub fn refresh<N, T>(&mut self, notes: &N, tags: &T) -> SourceResult<()>
    where
        N: NoteSource + ?Sized,
        T: TagSource + ?Sized,
    {
        self.begin_refresh();
        let notes_result = notes.fetch_notes();
        let tags_result = tags.fetch_tags();
        let first_error = notes_result
            .as_ref()
            .err()
            .or(tags_result.as_ref().err())
            .cloned();
        self.apply_notes_result(notes_result);
        self.apply_tags_result(tags_result);
        first_error.map_or(Ok(()), Err)
    }

    pub fn status(&self) -> QueryStatus {
        self.notes_status
    }

    pub fn tags_status(&self) -> QueryStatus {
        self.tags_status
    }

    /// Last fetch error, cleared by the next successful note refresh.
    pub fn last_error(&self) -> Option<&SourceError> {
        self.last_error.as_ref()
    }

    /// Whether a refresh failure should be indicated over the current list.
    pub fn shows_error_indicator(&self) -> bool {
        self.notes_status == QueryStatus::Error
    }

    /// Full, unfiltered collection from the last successful refresh.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Tag universe for the filter control, sorted by name.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tag chips for one card according to `ScreenConfig::tag_chip_limit`.
    pub fn card_tags<'n>(&self, note: &'n Note) -> Vec<&'n Tag> {
        note.display_tags(self.config.tag_chip_limit)
    }

    /// Ordered visible notes for `prefs`.
    pub fn visible_notes(&mut self, prefs: &ViewPreferences) -> &[Note] {
        self.ensure_ordered(prefs.criteria());
        self.derived
            .as_ref()
            .map_or(&[][..], |derived| derived.ordered.as_slice())
    }

    /// Derived view for `prefs`: a list, or two columns in grid mode.
    pub fn view(&mut self, prefs: &ViewPreferences) -> NotesView<'_> {
        self.ensure_ordered(prefs.criteria());
        let policy = self.config.column_policy;
        let Some(derived) = self.derived.as_mut() else {
            return NotesView::List(&[]);
        };

        if !prefs.is_grid_view {
            return NotesView::List(&derived.ordered);
        }

        let cached_policy = derived.columns.as_ref().map(|(cached, _)| *cached);
        if cached_policy != Some(policy) {
            derived.columns = Some((policy, partition_with(&derived.ordered, policy)));
        }
        match derived.columns.as_ref() {
            Some((_, columns)) => NotesView::Columns {
                left: &columns.left,
                right: &columns.right,
            },
            None => NotesView::List(&derived.ordered),
        }
    }

    /// How many times the ordered list has been recomputed.
    pub fn derivations(&self) -> u64 {
        self.derivations
    }

    /// Placeholder for an empty visible list; `None` when notes are shown.
    pub fn empty_state(&mut self, prefs: &ViewPreferences) -> Option<EmptyState> {
        let criteria = prefs.criteria();
        if !self.visible_notes(prefs).is_empty() {
            return None;
        }

        // `revision == 0` means no fetch has succeeded yet.
        let state = match (self.revision, self.notes_status) {
            (0, QueryStatus::Error) => EmptyState::Error,
            (0, _) => EmptyState::Loading,
            _ if criteria.is_active() => EmptyState::EmptySearch,
            _ => EmptyState::Empty,
        };
        Some(state)
    }

    /// Count shown in the list footer; `None` when the list is empty.
    pub fn footer_count(&mut self, prefs: &ViewPreferences) -> Option<usize> {
        let count = self.visible_notes(prefs).len();
        (count > 0).then_some(count)
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Toggles one note; returns whether it is selected afterwards.
    pub fn toggle_selection(&mut self, note: &Note) -> bool {
        self.selection.toggle(note)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Pull-to-refresh is only offered online.
    pub fn refresh_enabled(&self, connectivity: Connectivity) -> bool {
        connectivity.has_internet
    }

    /// The create button is only offered online.
    pub fn can_create_notes(&self, connectivity: Connectivity) -> bool {
        connectivity.has_internet
    }

    /// Evaluates the offline guard for a navigation intent.
    pub fn open_note<C>(
        &self,
        note_id: &str,
        connectivity: Connectivity,
        cache: &C,
    ) -> NavigationDecision
    where
        C: ContentCache + ?Sized,
    {
        let decision = can_open(note_id, connectivity, cache);
        match decision {
            NavigationDecision::Allowed => debug!(
                "event=note_open module=view status=ok note_id={note_id} online={}",
                connectivity.has_internet
            ),
            NavigationDecision::Denied(reason) => info!(
                "event=note_open module=view status=denied note_id={note_id} reason={}",
                reason.code()
            ),
        }
        decision
    }

    /// Creates a note of `kind` through `creator`.
    ///
    /// Refused offline with `SourceError::Unavailable`.
    pub fn create_note<C>(
        &self,
        creator: &C,
        kind: NoteType,
        connectivity: Connectivity,
    ) -> SourceResult<NoteId>
    where
        C: NoteCreator + ?Sized,
    {
        if !self.can_create_notes(connectivity) {
            return Err(SourceError::Unavailable("device is offline".to_string()));
        }

        match creator.create_note(kind) {
            Ok(note_id) => {
                info!(
                    "event=note_create module=view status=ok kind={} note_id={note_id}",
                    kind.as_str()
                );
                Ok(note_id)
            }
            Err(err) => {
                warn!(
                    "event=note_create module=view status=error kind={} error_code={}",
                    kind.as_str(),
                    err.code()
                );
                Err(err)
            }
        }
    }

    fn ensure_ordered(&mut self, criteria: FilterCriteria) {
        let key = OrderKey {
            revision: self.revision,
            criteria,
        };
        if self
            .derived
            .as_ref()
            .is_some_and(|derived| derived.key == key)
        {
            return;
        }

        let ordered = key.criteria.apply(&self.notes);
        self.derivations += 1;
        debug!(
            "event=notes_derive module=view status=ok total={} visible={} filtered={}",
            self.notes.len(),
            ordered.len(),
            key.criteria.is_active()
        );
        self.derived = Some(Derived {
            key,
            ordered,
            columns: None,
        });
    }
}
