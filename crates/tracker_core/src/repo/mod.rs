//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must call `validate()` on the model before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Repositories only accept connections migrated to the latest schema.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::dataset::DatasetValidationError;
use crate::model::entry::EntryValidationError;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod dataset_repo;
pub mod entry_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for dataset and entry persistence.
#[derive(Debug)]
pub enum RepoError {
    DatasetValidation(DatasetValidationError),
    EntryValidation(EntryValidationError),
    Db(DbError),
    NotFound {
        entity: &'static str,
        id: i64,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl RepoError {
    pub fn dataset_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "dataset",
            id,
        }
    }

    pub fn entry_not_found(id: i64) -> Self {
        Self::NotFound { entity: "entry", id }
    }

    /// Whether this error reports invalid caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::DatasetValidation(_) | Self::EntryValidation(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatasetValidation(err) => write!(f, "{err}"),
            Self::EntryValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DatasetValidation(err) => Some(err),
            Self::EntryValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) | Self::UninitializedConnection { .. } => {
                None
            }
        }
    }
}

impl From<DatasetValidationError> for RepoError {
    fn from(value: DatasetValidationError) -> Self {
        Self::DatasetValidation(value)
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::EntryValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn ensure_migrated(conn: &Connection) -> RepoResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

fn date_to_db(date: DateTime<Utc>) -> i64 {
    date.timestamp_millis()
}

fn date_from_db(millis: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        RepoError::InvalidData(format!("timestamp `{millis}` out of range in {column}"))
    })
}

fn optional_date_from_db(millis: Option<i64>, column: &str) -> RepoResult<Option<DateTime<Utc>>> {
    millis.map(|value| date_from_db(value, column)).transpose()
}
