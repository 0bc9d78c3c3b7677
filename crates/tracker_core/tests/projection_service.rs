use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rusqlite::Connection;
use tracker_core::db::open_db_in_memory;
use tracker_core::{
    Dataset, DatasetId, DatasetRepository, Entry, EntryRepository, ProjectionMode,
    ProjectionService, Projector, RepoError, SqliteDatasetRepository, SqliteEntryRepository,
    PROJECTED_LABEL,
};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap() + TimeDelta::days(n)
}

fn service(
    conn: &Connection,
) -> ProjectionService<SqliteDatasetRepository<'_>, SqliteEntryRepository<'_>> {
    ProjectionService::new(
        SqliteDatasetRepository::try_new(conn).unwrap(),
        SqliteEntryRepository::try_new(conn).unwrap(),
    )
}

fn seed(conn: &Connection, dataset: &Dataset, points: &[(i64, f64)]) -> DatasetId {
    let dataset_id = SqliteDatasetRepository::try_new(conn)
        .unwrap()
        .create_dataset(dataset)
        .unwrap();
    let entries = SqliteEntryRepository::try_new(conn).unwrap();
    for (offset, value) in points {
        entries
            .create_entry(&Entry::new(dataset_id, *value, "real", day(*offset)))
            .unwrap();
    }
    dataset_id
}

#[test]
fn projects_stored_entries_until_target() {
    let conn = open_db_in_memory().unwrap();
    let dataset = Dataset::new("savings").with_target(400.0);
    let id = seed(&conn, &dataset, &[(7, 300.0), (0, 100.0), (14, 200.0)]);

    let output = service(&conn).project_until_target(id).unwrap();

    let real: Vec<f64> = output
        .iter()
        .filter(|entry| !entry.projected)
        .map(|entry| entry.value)
        .collect();
    // Storage order is by date, so the real series is 100, 300, 200.
    assert_eq!(real, vec![100.0, 300.0, 200.0]);

    let projected: Vec<&Entry> = output.iter().filter(|entry| entry.projected).collect();
    let values: Vec<f64> = projected.iter().map(|entry| entry.value).collect();
    assert_eq!(values, vec![250.0, 300.0, 350.0, 400.0]);
    assert!(projected
        .iter()
        .all(|entry| entry.dataset_id == id && entry.id == 0 && entry.label == PROJECTED_LABEL));
    assert_eq!(projected[0].date, day(21));
}

#[test]
fn projects_stored_entries_until_end_date() {
    let conn = open_db_in_memory().unwrap();
    let dataset = Dataset::new("reading").with_end_date(day(3));
    let id = seed(&conn, &dataset, &[(0, 5.0), (1, 7.0)]);

    let output = service(&conn)
        .project(id, ProjectionMode::EndDate)
        .unwrap();

    let projected: Vec<(DateTime<Utc>, f64)> = output
        .iter()
        .filter(|entry| entry.projected)
        .map(|entry| (entry.date, entry.value))
        .collect();
    assert_eq!(projected, vec![(day(2), 9.0), (day(3), 11.0)]);
}

#[test]
fn projection_does_not_write_to_storage() {
    let conn = open_db_in_memory().unwrap();
    let dataset = Dataset::new("weight").with_target(10.0);
    let id = seed(&conn, &dataset, &[(0, 20.0), (1, 18.0)]);

    let output = service(&conn).project_until_target(id).unwrap();
    assert!(output.len() > 2);

    let stored = SqliteEntryRepository::try_new(&conn)
        .unwrap()
        .list_entries_by_dataset(id)
        .unwrap();
    assert_eq!(stored.len(), 2);
}

#[test]
fn bounded_projector_caps_output() {
    let conn = open_db_in_memory().unwrap();
    let dataset = Dataset::new("far").with_target(1_000_000.0);
    let id = seed(&conn, &dataset, &[(0, 0.0), (1, 1.0)]);

    let service = ProjectionService::with_projector(
        SqliteDatasetRepository::try_new(&conn).unwrap(),
        SqliteEntryRepository::try_new(&conn).unwrap(),
        Projector::with_max_projected(25),
    );
    let output = service.project_until_target(id).unwrap();
    assert_eq!(output.iter().filter(|entry| entry.projected).count(), 25);
}

#[test]
fn missing_dataset_is_not_found() {
    let conn = open_db_in_memory().unwrap();

    let err = service(&conn).project_until_end_date(12).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "dataset",
            id: 12
        }
    ));
}
