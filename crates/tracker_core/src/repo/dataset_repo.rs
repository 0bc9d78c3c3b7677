//! Dataset repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `datasets` table.
//!
//! # Invariants
//! - Write paths call `Dataset::validate()` before SQL mutations.
//! - Deleting a dataset removes its entries through `ON DELETE CASCADE`.

use super::{date_to_db, ensure_migrated, optional_date_from_db, RepoError, RepoResult};
use crate::model::dataset::{Dataset, DatasetId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const DATASET_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    symbol,
    target_value,
    start_date,
    end_date
FROM datasets";

/// Repository interface for dataset CRUD operations.
pub trait DatasetRepository {
    fn create_dataset(&self, dataset: &Dataset) -> RepoResult<DatasetId>;
    fn update_dataset(&self, dataset: &Dataset) -> RepoResult<()>;
    fn get_dataset(&self, id: DatasetId) -> RepoResult<Option<Dataset>>;
    fn list_datasets(&self) -> RepoResult<Vec<Dataset>>;
    fn delete_dataset(&self, id: DatasetId) -> RepoResult<()>;
}

/// SQLite-backed dataset repository.
pub struct SqliteDatasetRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDatasetRepository<'conn> {
    /// Wraps a connection that has been opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when migrations are behind.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self { conn })
    }
}

impl DatasetRepository for SqliteDatasetRepository<'_> {
    fn create_dataset(&self, dataset: &Dataset) -> RepoResult<DatasetId> {
        dataset.validate()?;

        self.conn.execute(
            "INSERT INTO datasets (
                name,
                description,
                symbol,
                target_value,
                start_date,
                end_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                dataset.name.as_str(),
                dataset.description.as_str(),
                dataset.symbol.as_str(),
                dataset.target_value,
                dataset.start_date.map(date_to_db),
                dataset.end_date.map(date_to_db),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_dataset(&self, dataset: &Dataset) -> RepoResult<()> {
        dataset.validate()?;

        let changed = self.conn.execute(
            "UPDATE datasets
             SET
                name = ?1,
                description = ?2,
                symbol = ?3,
                target_value = ?4,
                start_date = ?5,
                end_date = ?6
             WHERE id = ?7;",
            params![
                dataset.name.as_str(),
                dataset.description.as_str(),
                dataset.symbol.as_str(),
                dataset.target_value,
                dataset.start_date.map(date_to_db),
                dataset.end_date.map(date_to_db),
                dataset.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::dataset_not_found(dataset.id));
        }

        Ok(())
    }

    fn get_dataset(&self, id: DatasetId) -> RepoResult<Option<Dataset>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DATASET_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id], |row| Ok(parse_dataset_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_datasets(&self) -> RepoResult<Vec<Dataset>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DATASET_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut datasets = Vec::new();

        while let Some(row) = rows.next()? {
            datasets.push(parse_dataset_row(row)?);
        }

        Ok(datasets)
    }

    fn delete_dataset(&self, id: DatasetId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM datasets WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::dataset_not_found(id));
        }

        Ok(())
    }
}

/// Returns whether a dataset row exists.
pub(crate) fn dataset_exists(conn: &Connection, id: DatasetId) -> RepoResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM datasets WHERE id = ?1);",
        [id],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}

fn parse_dataset_row(row: &Row<'_>) -> RepoResult<Dataset> {
    let dataset = Dataset {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        symbol: row.get("symbol")?,
        target_value: row.get("target_value")?,
        start_date: optional_date_from_db(row.get("start_date")?, "datasets.start_date")?,
        end_date: optional_date_from_db(row.get("end_date")?, "datasets.end_date")?,
    };
    dataset
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("dataset {}: {err}", dataset.id)))?;
    Ok(dataset)
}
