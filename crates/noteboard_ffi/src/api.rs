//! FFI use-case API for the Flutter notes screen.
//!
//! # Responsibility
//! - Expose note list derivation, the offline guard and view preferences
//!   to Dart via FRB.
//! - Keep error semantics simple: message strings and flat envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Derivation calls are pure; only preference/cache calls touch the DB.
//!
//! Selection state stays on the Dart side of the notes screen; this layer
//! only exposes stateless calls.

use log::warn;
use noteboard_core::db::open_db;
use noteboard_core::prefs::{SEARCH_TERM_KEY, SELECTED_TAG_KEY};
use noteboard_core::{
    can_open, core_version as core_version_inner, init_logging as init_logging_inner,
    partition_with, ping as ping_inner, toggle_grid_view, ColumnPolicy, Connectivity,
    FilterCriteria, NavigationDecision, Note, NoteType, PreferenceStore, SqliteContentCache,
    SqlitePreferenceStore, Tag, ViewPreferences,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;

const VIEW_DB_FILE_NAME: &str = "noteboard_view.sqlite3";
static VIEW_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Tag reference attached to an FFI note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiTag {
    pub uuid: String,
    pub name: String,
}

/// Note fields the list derivation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiNote {
    pub uuid: String,
    /// Wire note type (`text|md|code|rich|checklist`); unknown maps to `text`.
    pub note_type: String,
    pub title: String,
    pub preview: String,
    pub tags: Vec<FfiTag>,
    pub pinned: bool,
    pub favorite: bool,
    pub edited_timestamp: i64,
}

/// Derived list envelope. Notes are returned by id; Dart keeps the values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesViewResponse {
    /// Visible note ids in display order.
    pub ordered_ids: Vec<String>,
    /// Left column ids; empty unless `grid` was requested.
    pub left_ids: Vec<String>,
    /// Right column ids; empty unless `grid` was requested.
    pub right_ids: Vec<String>,
    /// Whether search or tag filters were in effect.
    pub filters_active: bool,
}

/// Navigation guard envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenNoteResponse {
    pub allowed: bool,
    /// Stable denial code, `None` when allowed.
    pub reason_code: Option<String>,
    /// User-facing message; empty when allowed.
    pub message: String,
}

/// Persisted view preference snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiViewPreferences {
    pub search_term: String,
    pub selected_tag: String,
    pub is_grid_view: bool,
    /// Empty on success; error message when preferences could not be read.
    pub message: String,
}

/// Filters, sorts and optionally partitions notes.
///
/// # FFI contract
/// - Sync call, pure, no DB access.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_view_derive(
    notes: Vec<FfiNote>,
    search_term: String,
    selected_tag: String,
    grid: bool,
    balanced_columns: bool,
) -> NotesViewResponse {
    let notes = notes.into_iter().map(to_core_note).collect::<Vec<_>>();
    let criteria = FilterCriteria::new(search_term, selected_tag);
    let policy = if balanced_columns {
        ColumnPolicy::Balanced
    } else {
        ColumnPolicy::Alternating
    };
    derive_view(&notes, &criteria, grid, policy)
}

/// Same as [`notes_view_derive`] using persisted view preferences.
///
/// Falls back to default preferences when the view DB cannot be read.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_view_derive_with_prefs(
    notes: Vec<FfiNote>,
    balanced_columns: bool,
) -> NotesViewResponse {
    let prefs = with_view_db(|conn| {
        let store = SqlitePreferenceStore::try_new(conn).map_err(|err| err.to_string())?;
        ViewPreferences::load(&store).map_err(|err| err.to_string())
    })
    .unwrap_or_else(|err| {
        warn!("event=prefs_read module=ffi status=error error={err}");
        ViewPreferences::default()
    });
    notes_view_derive(
        notes,
        prefs.search_term,
        prefs.selected_tag,
        prefs.is_grid_view,
        balanced_columns,
    )
}

/// Decides whether a note may be opened with the given connectivity snapshot.
///
/// # FFI contract
/// - Sync call; offline checks read the local content cache.
/// - Cache failures count as "not cached".
#[flutter_rust_bridge::frb(sync)]
pub fn notes_can_open(note_id: String, has_internet: bool) -> OpenNoteResponse {
    let note_id = note_id.trim();
    let connectivity = Connectivity::new(has_internet);
    let decision = if connectivity.has_internet {
        can_open(note_id, connectivity, &|_: &str| false)
    } else {
        with_view_db(|conn| {
            let cache = SqliteContentCache::try_new(conn).map_err(|err| err.to_string())?;
            Ok(can_open(note_id, connectivity, &cache))
        })
        .unwrap_or_else(|err| {
            warn!("event=note_open module=ffi status=error error={err}");
            can_open(note_id, connectivity, &|_: &str| false)
        })
    };

    match decision {
        NavigationDecision::Allowed => OpenNoteResponse {
            allowed: true,
            reason_code: None,
            message: String::new(),
        },
        NavigationDecision::Denied(reason) => OpenNoteResponse {
            allowed: false,
            reason_code: Some(reason.code().to_string()),
            message: reason.message().to_string(),
        },
    }
}

/// Stores note content for offline opening.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_cache_put(note_id: String, content: String, edited_timestamp: i64) -> String {
    flatten(with_view_db(|conn| {
        let cache = SqliteContentCache::try_new(conn).map_err(|err| err.to_string())?;
        cache
            .put(note_id.trim(), &content, edited_timestamp)
            .map_err(|err| err.to_string())
    }))
}

/// Removes cached content for one note.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_cache_evict(note_id: String) -> String {
    flatten(with_view_db(|conn| {
        let cache = SqliteContentCache::try_new(conn).map_err(|err| err.to_string())?;
        cache
            .evict(note_id.trim())
            .map(|_| ())
            .map_err(|err| err.to_string())
    }))
}

/// Reads persisted view preferences.
#[flutter_rust_bridge::frb(sync)]
pub fn prefs_get_view() -> FfiViewPreferences {
    let result = with_view_db(|conn| {
        let store = SqlitePreferenceStore::try_new(conn).map_err(|err| err.to_string())?;
        ViewPreferences::load(&store).map_err(|err| err.to_string())
    });
    match result {
        Ok(prefs) => FfiViewPreferences {
            search_term: prefs.search_term,
            selected_tag: prefs.selected_tag,
            is_grid_view: prefs.is_grid_view,
            message: String::new(),
        },
        Err(err) => {
            let defaults = ViewPreferences::default();
            FfiViewPreferences {
                search_term: defaults.search_term,
                selected_tag: defaults.selected_tag,
                is_grid_view: defaults.is_grid_view,
                message: format!("prefs_get_view failed: {err}"),
            }
        }
    }
}

/// Persists the search term.
#[flutter_rust_bridge::frb(sync)]
pub fn prefs_set_search_term(value: String) -> String {
    set_pref(SEARCH_TERM_KEY, &value)
}

/// Persists the selected tag uuid (or `all`).
#[flutter_rust_bridge::frb(sync)]
pub fn prefs_set_selected_tag(value: String) -> String {
    set_pref(SELECTED_TAG_KEY, value.trim())
}

/// Flips list/grid layout. Returns the new grid flag (`false` on failure).
#[flutter_rust_bridge::frb(sync)]
pub fn prefs_toggle_grid_view() -> bool {
    with_view_db(|conn| {
        let store = SqlitePreferenceStore::try_new(conn).map_err(|err| err.to_string())?;
        toggle_grid_view(&store).map_err(|err| err.to_string())
    })
    .unwrap_or_else(|err| {
        warn!("event=prefs_write module=ffi status=error error={err}");
        false
    })
}

/// Wire values offered by the create-note menu, in menu order.
#[flutter_rust_bridge::frb(sync)]
pub fn note_types() -> Vec<String> {
    NoteType::ALL
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect()
}

fn derive_view(
    notes: &[Note],
    criteria: &FilterCriteria,
    grid: bool,
    policy: ColumnPolicy,
) -> NotesViewResponse {
    let ordered = criteria.apply(notes);
    let (left_ids, right_ids) = if grid {
        let columns = partition_with(&ordered, policy);
        (ids_of(&columns.left), ids_of(&columns.right))
    } else {
        (Vec::new(), Vec::new())
    };
    NotesViewResponse {
        ordered_ids: ids_of(&ordered),
        left_ids,
        right_ids,
        filters_active: criteria.is_active(),
    }
}

fn ids_of(notes: &[Note]) -> Vec<String> {
    notes.iter().map(|note| note.key().to_string()).collect()
}

fn to_core_note(note: FfiNote) -> Note {
    let mut core = Note::with_id(note.uuid, note.title, note.edited_timestamp);
    core.note_type = NoteType::parse(&note.note_type).unwrap_or_default();
    core.preview = note.preview;
    core.tags = note
        .tags
        .into_iter()
        .map(|tag| Tag::new(tag.uuid, tag.name))
        .collect();
    core.pinned = note.pinned;
    core.favorite = note.favorite;
    core
}

fn set_pref(key: &str, value: &str) -> String {
    flatten(with_view_db(|conn| {
        let store = SqlitePreferenceStore::try_new(conn).map_err(|err| err.to_string())?;
        store.set_string(key, value).map_err(|err| err.to_string())
    }))
}

fn flatten(result: Result<(), String>) -> String {
    match result {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

fn resolve_view_db_path() -> PathBuf {
    VIEW_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("NOTEBOARD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(VIEW_DB_FILE_NAME)
        })
        .clone()
}

fn with_view_db<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_view_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("view DB open failed: {err}"))?;
    f(&conn)
}
