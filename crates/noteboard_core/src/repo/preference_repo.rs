//! SQLite key/value store for view preferences.
//!
//! # Invariants
//! - One row per key; `set_string` upserts.
//! - `updated_at` is refreshed on every write (epoch milliseconds).

use super::{ensure_table, RepoResult};
use crate::prefs::PreferenceStore;
use rusqlite::{params, Connection, OptionalExtension};

/// `PreferenceStore` over the `view_preferences` table.
pub struct SqlitePreferenceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceStore<'conn> {
    /// Constructs a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "view_preferences")?;
        Ok(Self { conn })
    }

    /// Removes one key. Returns whether a row existed.
    pub fn remove(&self, key: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM view_preferences WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

impl PreferenceStore for SqlitePreferenceStore<'_> {
    fn get_string(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM view_preferences WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_string(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO view_preferences (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
