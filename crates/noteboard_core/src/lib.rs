//! Core view-state logic for the Noteboard notes screen.
//! This crate is the single source of truth for list derivation invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod repo;
pub mod source;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::note::{Note, NoteId, NoteType, Participant, Tag};
pub use prefs::{toggle_grid_view, MemoryPreferenceStore, PreferenceStore, ViewPreferences};
pub use repo::content_cache_repo::{CachedContent, SqliteContentCache};
pub use repo::preference_repo::SqlitePreferenceStore;
pub use repo::{RepoError, RepoResult};
pub use source::{NoteCreator, NoteSource, QueryStatus, SourceError, SourceResult, TagSource};
pub use view::columns::{partition, partition_balanced, partition_with, ColumnPolicy, Columns};
pub use view::controller::{EmptyState, NotesView, NotesViewController, ScreenConfig};
pub use view::filter::{filter_and_sort, FilterCriteria, ALL_TAGS};
pub use view::guard::{can_open, Connectivity, ContentCache, DenialReason, NavigationDecision};
pub use view::selection::SelectionStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
