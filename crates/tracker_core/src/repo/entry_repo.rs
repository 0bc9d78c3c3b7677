//! Entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `entries` table, scoped by dataset for reads.
//!
//! # Invariants
//! - Write paths call `Entry::validate()`, so projected entries never land
//!   in storage.
//! - An entry's dataset is fixed at creation; updates never move it.

use super::dataset_repo::dataset_exists;
use super::{date_from_db, date_to_db, ensure_migrated, RepoError, RepoResult};
use crate::model::dataset::DatasetId;
use crate::model::entry::{Entry, EntryId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    dataset_id,
    value,
    label,
    date
FROM entries";

/// Repository interface for entry CRUD operations.
pub trait EntryRepository {
    fn create_entry(&self, entry: &Entry) -> RepoResult<EntryId>;
    fn update_entry(&self, entry: &Entry) -> RepoResult<()>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    fn list_entries_by_dataset(&self, dataset_id: DatasetId) -> RepoResult<Vec<Entry>>;
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Wraps a connection that has been opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when migrations are behind.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, entry: &Entry) -> RepoResult<EntryId> {
        entry.validate()?;
        if !dataset_exists(self.conn, entry.dataset_id)? {
            return Err(RepoError::dataset_not_found(entry.dataset_id));
        }

        self.conn.execute(
            "INSERT INTO entries (dataset_id, value, label, date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.dataset_id,
                entry.value,
                entry.label.as_str(),
                date_to_db(entry.date),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_entry(&self, entry: &Entry) -> RepoResult<()> {
        entry.validate()?;

        let changed = self.conn.execute(
            "UPDATE entries
             SET
                value = ?1,
                label = ?2,
                date = ?3
             WHERE id = ?4;",
            params![
                entry.value,
                entry.label.as_str(),
                date_to_db(entry.date),
                entry.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::entry_not_found(entry.id));
        }

        Ok(())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_entry_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_entries_by_dataset(&self, dataset_id: DatasetId) -> RepoResult<Vec<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE dataset_id = ?1
             ORDER BY date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([dataset_id])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::entry_not_found(id));
        }

        Ok(())
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let value: f64 = row.get("value")?;
    if !value.is_finite() {
        return Err(RepoError::InvalidData(format!(
            "non-finite value `{value}` in entries.value"
        )));
    }

    Ok(Entry {
        id: row.get("id")?,
        dataset_id: row.get("dataset_id")?,
        value,
        label: row.get("label")?,
        date: date_from_db(row.get("date")?, "entries.date")?,
        projected: false,
    })
}
