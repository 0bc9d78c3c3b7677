use chrono::{TimeZone, Utc};
use rusqlite::Connection;
use tracker_core::db::open_db_in_memory;
use tracker_core::{
    Dataset, DatasetRepository, DatasetService, Entry, EntryRepository, RepoError,
    SqliteDatasetRepository, SqliteEntryRepository,
};

fn sample_dataset() -> Dataset {
    let mut dataset = Dataset::new("Body weight").with_target(70.0);
    dataset.description = "morning weigh-ins".to_string();
    dataset.symbol = "kg".to_string();
    dataset.start_date = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    dataset.end_date = Some(Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap());
    dataset
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDatasetRepository::try_new(&conn).unwrap();

    let dataset = sample_dataset();
    let id = repo.create_dataset(&dataset).unwrap();
    assert!(id > 0);

    let loaded = repo.get_dataset(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.name, "Body weight");
    assert_eq!(loaded.symbol, "kg");
    assert_eq!(loaded.target_value, Some(70.0));
    assert_eq!(loaded.start_date, dataset.start_date);
    assert_eq!(loaded.end_date, dataset.end_date);
}

#[test]
fn optional_bounds_roundtrip_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDatasetRepository::try_new(&conn).unwrap();

    let id = repo.create_dataset(&Dataset::new("unbounded")).unwrap();
    let loaded = repo.get_dataset(id).unwrap().unwrap();
    assert!(loaded.target_value.is_none());
    assert!(loaded.start_date.is_none());
    assert!(loaded.end_date.is_none());
}

#[test]
fn get_missing_dataset_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDatasetRepository::try_new(&conn).unwrap();

    assert!(repo.get_dataset(404).unwrap().is_none());
}

#[test]
fn update_existing_dataset() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDatasetRepository::try_new(&conn).unwrap();

    let mut dataset = sample_dataset();
    dataset.id = repo.create_dataset(&dataset).unwrap();

    dataset.name = "Weight".to_string();
    dataset.target_value = None;
    dataset.end_date = None;
    repo.update_dataset(&dataset).unwrap();

    let loaded = repo.get_dataset(dataset.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Weight");
    assert!(loaded.target_value.is_none());
    assert!(loaded.end_date.is_none());
}

#[test]
fn update_and_delete_missing_dataset_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDatasetRepository::try_new(&conn).unwrap();

    let mut missing = sample_dataset();
    missing.id = 77;
    let update_err = repo.update_dataset(&missing).unwrap_err();
    assert!(matches!(
        update_err,
        RepoError::NotFound {
            entity: "dataset",
            id: 77
        }
    ));

    let delete_err = repo.delete_dataset(77).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound { id: 77, .. }));
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDatasetRepository::try_new(&conn).unwrap();

    let create_err = repo.create_dataset(&Dataset::new("  ")).unwrap_err();
    assert!(create_err.is_validation());

    let mut dataset = sample_dataset();
    dataset.id = repo.create_dataset(&dataset).unwrap();
    dataset.end_date = Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    let update_err = repo.update_dataset(&dataset).unwrap_err();
    assert!(matches!(update_err, RepoError::DatasetValidation(_)));
}

#[test]
fn list_returns_datasets_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDatasetRepository::try_new(&conn).unwrap();

    let first = repo.create_dataset(&Dataset::new("a")).unwrap();
    let second = repo.create_dataset(&Dataset::new("b")).unwrap();

    let ids: Vec<i64> = repo
        .list_datasets()
        .unwrap()
        .into_iter()
        .map(|dataset| dataset.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn deleting_dataset_cascades_to_entries() {
    let conn = open_db_in_memory().unwrap();
    let datasets = SqliteDatasetRepository::try_new(&conn).unwrap();
    let entries = SqliteEntryRepository::try_new(&conn).unwrap();

    let id = datasets.create_dataset(&Dataset::new("doomed")).unwrap();
    let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let entry_id = entries
        .create_entry(&Entry::new(id, 1.0, "only", date))
        .unwrap();

    datasets.delete_dataset(id).unwrap();

    assert!(datasets.get_dataset(id).unwrap().is_none());
    assert!(entries.get_entry(entry_id).unwrap().is_none());
}

#[test]
fn service_assigns_ids_and_requires_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    let service = DatasetService::new(SqliteDatasetRepository::try_new(&conn).unwrap());

    let mut payload = sample_dataset();
    payload.id = 999;
    let created = service.create_dataset(&payload).unwrap();
    assert_ne!(created.id, 999);
    assert_eq!(service.require_dataset(created.id).unwrap(), created);

    let mut renamed = created.clone();
    renamed.name = "renamed".to_string();
    renamed.id = 12345;
    service.update_dataset(created.id, &renamed).unwrap();
    assert_eq!(
        service.require_dataset(created.id).unwrap().name,
        "renamed"
    );

    service.delete_dataset(created.id).unwrap();
    assert!(matches!(
        service.require_dataset(created.id),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteDatasetRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}
