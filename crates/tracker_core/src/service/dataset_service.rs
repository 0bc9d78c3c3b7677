//! Dataset use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Ids supplied by callers in payloads are ignored in favor of path ids.

use crate::model::dataset::{Dataset, DatasetId};
use crate::repo::dataset_repo::DatasetRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;

/// Use-case service wrapper for dataset CRUD operations.
pub struct DatasetService<R: DatasetRepository> {
    repo: R,
}

impl<R: DatasetRepository> DatasetService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new dataset and returns it with its assigned id.
    pub fn create_dataset(&self, dataset: &Dataset) -> RepoResult<Dataset> {
        let id = self.repo.create_dataset(dataset)?;
        info!("event=dataset_create module=service status=ok dataset_id={id}");
        Ok(Dataset {
            id,
            ..dataset.clone()
        })
    }

    /// Replaces all fields of the dataset identified by `id`.
    pub fn update_dataset(&self, id: DatasetId, dataset: &Dataset) -> RepoResult<()> {
        self.repo.update_dataset(&Dataset {
            id,
            ..dataset.clone()
        })
    }

    pub fn get_dataset(&self, id: DatasetId) -> RepoResult<Option<Dataset>> {
        self.repo.get_dataset(id)
    }

    /// Like `get_dataset`, but a missing row is `RepoError::NotFound`.
    pub fn require_dataset(&self, id: DatasetId) -> RepoResult<Dataset> {
        self.repo
            .get_dataset(id)?
            .ok_or_else(|| RepoError::dataset_not_found(id))
    }

    pub fn list_datasets(&self) -> RepoResult<Vec<Dataset>> {
        self.repo.list_datasets()
    }

    /// Deletes a dataset together with all of its entries.
    pub fn delete_dataset(&self, id: DatasetId) -> RepoResult<()> {
        self.repo.delete_dataset(id)?;
        info!("event=dataset_delete module=service status=ok dataset_id={id}");
        Ok(())
    }
}
