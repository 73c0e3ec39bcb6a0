//! SQLite cache of note content for offline opening.
//!
//! # Responsibility
//! - Store the last fetched content per note.
//! - Answer `ContentCache::has_cached` lookups for the offline guard.
//!
//! # Invariants
//! - One row per note; `put` replaces older content.
//! - Lookup failures are reported as "not cached" so the guard stays total.

use super::{ensure_table, RepoResult};
use crate::view::guard::ContentCache;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};

/// Cached content row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedContent {
    pub note_id: String,
    pub content: String,
    /// Edit timestamp of the note revision this content belongs to.
    pub edited_timestamp: i64,
}

/// `ContentCache` over the `note_content_cache` table.
pub struct SqliteContentCache<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContentCache<'conn> {
    /// Constructs a cache from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "note_content_cache")?;
        Ok(Self { conn })
    }

    /// Stores or replaces content for one note.
    pub fn put(&self, note_id: &str, content: &str, edited_timestamp: i64) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO note_content_cache (note_uuid, content, edited_timestamp, cached_at)
             VALUES (?1, ?2, ?3, (strftime('%s', 'now') * 1000))
             ON CONFLICT(note_uuid) DO UPDATE SET
                content = excluded.content,
                edited_timestamp = excluded.edited_timestamp,
                cached_at = excluded.cached_at;",
            params![note_id, content, edited_timestamp],
        )?;
        Ok(())
    }

    pub fn get(&self, note_id: &str) -> RepoResult<Option<CachedContent>> {
        let row = self
            .conn
            .query_row(
                "SELECT note_uuid, content, edited_timestamp
                 FROM note_content_cache
                 WHERE note_uuid = ?1;",
                [note_id],
                |row| {
                    Ok(CachedContent {
                        note_id: row.get(0)?,
                        content: row.get(1)?,
                        edited_timestamp: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn contains(&self, note_id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM note_content_cache WHERE note_uuid = ?1);",
            [note_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    /// Removes cached content for one note. Returns whether a row existed.
    pub fn evict(&self, note_id: &str) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM note_content_cache WHERE note_uuid = ?1;",
            [note_id],
        )?;
        Ok(changed > 0)
    }

    /// Drops cached content for notes that are no longer in the collection.
    ///
    /// Returns how many rows were removed.
    pub fn evict_missing(&self, live_note_ids: &[&str]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let cached_ids = {
            let mut stmt = tx.prepare("SELECT note_uuid FROM note_content_cache;")?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            ids
        };

        let mut removed = 0;
        for cached_id in cached_ids
            .iter()
            .filter(|cached_id| !live_note_ids.contains(&cached_id.as_str()))
        {
            removed += tx.execute(
                "DELETE FROM note_content_cache WHERE note_uuid = ?1;",
                [cached_id.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(removed)
    }
}

impl ContentCache for SqliteContentCache<'_> {
    fn has_cached(&self, note_id: &str) -> bool {
        match self.contains(note_id) {
            Ok(found) => found,
            Err(err) => {
                warn!(
                    "event=content_cache_lookup module=repo status=error error_code=lookup_failed error={err}"
                );
                false
            }
        }
    }
}
