//! Core domain logic for the dataset tracker.
//! This crate owns the data model, storage, services and the projection engine.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig,
};
pub use model::dataset::{Dataset, DatasetId, DatasetValidationError};
pub use model::entry::{
    Entry, EntryId, EntryValidationError, PROJECTED_ENTRY_ID, PROJECTED_LABEL,
};
pub use projection::{
    estimate_trend, project_until_end_date, project_until_target, ProjectionMode, Projector, Trend,
};
pub use repo::dataset_repo::{DatasetRepository, SqliteDatasetRepository};
pub use repo::entry_repo::{EntryRepository, SqliteEntryRepository};
pub use repo::{RepoError, RepoResult};
pub use service::dataset_service::DatasetService;
pub use service::entry_service::EntryService;
pub use service::projection_service::ProjectionService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
