//! Entry use-case service.

use crate::model::dataset::DatasetId;
use crate::model::entry::{Entry, EntryId};
use crate::repo::entry_repo::EntryRepository;
use crate::repo::RepoResult;

/// Use-case service wrapper for entry CRUD operations.
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a real observation under `dataset_id`.
    ///
    /// # Contract
    /// - `dataset_id` overrides any dataset id carried by `entry`.
    /// - Returns the stored entry with its assigned id.
    pub fn create_entry(&self, dataset_id: DatasetId, entry: &Entry) -> RepoResult<Entry> {
        let mut stored = Entry {
            dataset_id,
            ..entry.clone()
        };
        stored.id = self.repo.create_entry(&stored)?;
        Ok(stored)
    }

    /// Replaces value, label and date of the entry identified by `id`.
    pub fn update_entry(&self, id: EntryId, entry: &Entry) -> RepoResult<()> {
        self.repo.update_entry(&Entry {
            id,
            ..entry.clone()
        })
    }

    pub fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        self.repo.get_entry(id)
    }

    /// Lists a dataset's entries oldest first.
    pub fn list_entries(&self, dataset_id: DatasetId) -> RepoResult<Vec<Entry>> {
        self.repo.list_entries_by_dataset(dataset_id)
    }

    pub fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        self.repo.delete_entry(id)
    }
}
