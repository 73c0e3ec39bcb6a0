//! Local SQLite database holding view preferences and cached note content.
//!
//! # Responsibility
//! - Hand out connections that the preference and content cache stores accept.
//! - Classify open and migration failures with stable error codes.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A database written by a newer build is never downgraded or touched.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the view-state database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build than this one.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl DbError {
    /// Stable code used in log lines and FFI messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::UnsupportedSchemaVersion { .. } => "schema_too_new",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "view database is at schema {found}, this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn schema_errors_have_no_source() {
        let err = DbError::UnsupportedSchemaVersion {
            found: 4,
            supported: 2,
        };
        assert_eq!(err.code(), "schema_too_new");
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "view database is at schema 4, this build reads up to 2"
        );
    }

    #[test]
    fn sqlite_errors_use_sqlite_code() {
        let err = DbError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.code(), "sqlite");
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("sqlite: "));
    }
}
