use noteboard_core::db::open_db_in_memory;
use noteboard_core::{
    can_open, toggle_grid_view, Connectivity, ContentCache, DenialReason, NavigationDecision,
    PreferenceStore, RepoError, SqliteContentCache, SqlitePreferenceStore, ViewPreferences,
};
use rusqlite::Connection;

#[test]
fn preferences_persist_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.db");

    {
        let conn = noteboard_core::db::open_db(&path).unwrap();
        let store = SqlitePreferenceStore::try_new(&conn).unwrap();
        store.set_string("notesSearchTerm", "groceries").unwrap();
        store.set_string("notesSelectedTag", "tag-home").unwrap();
        assert!(toggle_grid_view(&store).unwrap());
    }

    let conn = noteboard_core::db::open_db(&path).unwrap();
    let store = SqlitePreferenceStore::try_new(&conn).unwrap();
    let prefs = ViewPreferences::load(&store).unwrap();
    assert_eq!(prefs.search_term, "groceries");
    assert_eq!(prefs.selected_tag, "tag-home");
    assert!(prefs.is_grid_view);
}

#[test]
fn set_string_overwrites_and_remove_restores_default() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePreferenceStore::try_new(&conn).unwrap();

    store.set_string("notesSelectedTag", "a").unwrap();
    store.set_string("notesSelectedTag", "b").unwrap();
    assert_eq!(
        store.get_string("notesSelectedTag").unwrap().as_deref(),
        Some("b")
    );

    assert!(store.remove("notesSelectedTag").unwrap());
    assert!(!store.remove("notesSelectedTag").unwrap());
    assert_eq!(ViewPreferences::load(&store).unwrap().selected_tag, "all");
}

#[test]
fn stores_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqlitePreferenceStore::try_new(&conn)
        .err()
        .expect("unmigrated connection must be rejected");
    assert!(matches!(err, RepoError::MissingRequiredTable("view_preferences")));

    let err = SqliteContentCache::try_new(&conn)
        .err()
        .expect("unmigrated connection must be rejected");
    assert!(matches!(
        err,
        RepoError::MissingRequiredTable("note_content_cache")
    ));
}

#[test]
fn content_cache_put_get_and_evict() {
    let conn = open_db_in_memory().unwrap();
    let cache = SqliteContentCache::try_new(&conn).unwrap();

    cache.put("note-1", "first body", 10).unwrap();
    cache.put("note-1", "second body", 20).unwrap();
    let cached = cache.get("note-1").unwrap().expect("content should be cached");
    assert_eq!(cached.content, "second body");
    assert_eq!(cached.edited_timestamp, 20);
    assert!(cache.has_cached("note-1"));

    assert!(cache.evict("note-1").unwrap());
    assert!(!cache.has_cached("note-1"));
    assert!(cache.get("note-1").unwrap().is_none());
}

#[test]
fn evict_missing_keeps_only_live_notes() {
    let conn = open_db_in_memory().unwrap();
    let cache = SqliteContentCache::try_new(&conn).unwrap();
    for id in ["a", "b", "c"] {
        cache.put(id, "body", 1).unwrap();
    }

    let removed = cache.evict_missing(&["a", "c"]).unwrap();
    assert_eq!(removed, 1);
    assert!(cache.has_cached("a"));
    assert!(!cache.has_cached("b"));
    assert!(cache.has_cached("c"));
}

#[test]
fn offline_guard_follows_sqlite_cache_state() {
    let conn = open_db_in_memory().unwrap();
    let cache = SqliteContentCache::try_new(&conn).unwrap();

    assert_eq!(
        can_open("x", Connectivity::OFFLINE, &cache),
        NavigationDecision::Denied(DenialReason::OfflineContentUnavailable)
    );
    assert!(can_open("x", Connectivity::ONLINE, &cache).is_allowed());

    cache.put("x", "cached body", 5).unwrap();
    assert!(can_open("x", Connectivity::OFFLINE, &cache).is_allowed());
}
