//! Projection use-case service.
//!
//! # Responsibility
//! - Load a dataset and its entries, then run the projection engine.
//!
//! # Invariants
//! - A missing dataset is `RepoError::NotFound`; the engine itself never fails.
//! - Storage is only read, never written.

use crate::model::dataset::DatasetId;
use crate::model::entry::Entry;
use crate::projection::{ProjectionMode, Projector};
use crate::repo::dataset_repo::DatasetRepository;
use crate::repo::entry_repo::EntryRepository;
use crate::repo::{RepoError, RepoResult};
use log::debug;

pub struct ProjectionService<D: DatasetRepository, E: EntryRepository> {
    datasets: D,
    entries: E,
    projector: Projector,
}

impl<D: DatasetRepository, E: EntryRepository> ProjectionService<D, E> {
    /// Creates a service with an unbounded projector.
    pub fn new(datasets: D, entries: E) -> Self {
        Self::with_projector(datasets, entries, Projector::unbounded())
    }

    pub fn with_projector(datasets: D, entries: E, projector: Projector) -> Self {
        Self {
            datasets,
            entries,
            projector,
        }
    }

    /// Returns the dataset's real entries followed by projected ones.
    pub fn project(&self, dataset_id: DatasetId, mode: ProjectionMode) -> RepoResult<Vec<Entry>> {
        let dataset = self
            .datasets
            .get_dataset(dataset_id)?
            .ok_or_else(|| RepoError::dataset_not_found(dataset_id))?;
        let entries = self.entries.list_entries_by_dataset(dataset_id)?;

        let projected = self.projector.project(mode, &dataset, &entries);
        debug!(
            "event=projection module=service status=ok mode={mode} dataset_id={dataset_id} real={} projected={}",
            entries.len(),
            projected.len().saturating_sub(entries.len())
        );
        Ok(projected)
    }

    pub fn project_until_target(&self, dataset_id: DatasetId) -> RepoResult<Vec<Entry>> {
        self.project(dataset_id, ProjectionMode::Target)
    }

    pub fn project_until_end_date(&self, dataset_id: DatasetId) -> RepoResult<Vec<Entry>> {
        self.project(dataset_id, ProjectionMode::EndDate)
    }
}
