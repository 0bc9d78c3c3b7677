//! Tracker storage: connection setup and schema versioning.
//!
//! # Responsibility
//! - Hand out SQLite connections that already carry the datasets/entries
//!   schema and enforce foreign keys.
//! - Upgrade older tracker databases in place.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`; 0 is an empty file.
//! - A database written by a newer tracker is never opened.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading a tracker database.
#[derive(Debug)]
pub enum DbError {
    /// SQLite rejected a connection-level call.
    Sqlite(rusqlite::Error),
    /// A schema step failed; the upgrade transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a tracker with a newer schema.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "tracker database error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "tracker schema migration {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "tracker database uses schema {found}, this build understands up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
