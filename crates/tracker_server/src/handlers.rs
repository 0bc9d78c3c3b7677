//! Route handlers.
//!
//! Each handler parses path ids, runs one service call under the connection
//! lock on the blocking pool and serializes the result.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracker_core::{
    Dataset, DatasetService, Entry, EntryService, ProjectionMode, ProjectionService,
    SqliteDatasetRepository, SqliteEntryRepository,
};

const INVALID_DATASET_ID: &str = "invalid dataset id";
const INVALID_ENTRY_ID: &str = "invalid entry id";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: tracker_core::core_version(),
    })
}

pub async fn create_dataset(
    State(state): State<AppState>,
    payload: Result<Json<Dataset>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Dataset>)> {
    let Json(dataset) = payload?;
    let created = state
        .with_conn(move |conn| {
            DatasetService::new(SqliteDatasetRepository::try_new(conn)?).create_dataset(&dataset)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_datasets(State(state): State<AppState>) -> ApiResult<Json<Vec<Dataset>>> {
    let datasets = state
        .with_conn(|conn| {
            DatasetService::new(SqliteDatasetRepository::try_new(conn)?).list_datasets()
        })
        .await?;
    Ok(Json(datasets))
}

pub async fn get_dataset(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Dataset>> {
    let id = parse_id(&raw_id, INVALID_DATASET_ID)?;
    let dataset = state
        .with_conn(move |conn| {
            DatasetService::new(SqliteDatasetRepository::try_new(conn)?).require_dataset(id)
        })
        .await?;
    Ok(Json(dataset))
}

pub async fn update_dataset(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Dataset>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id, INVALID_DATASET_ID)?;
    let Json(dataset) = payload?;
    state
        .with_conn(move |conn| {
            DatasetService::new(SqliteDatasetRepository::try_new(conn)?)
                .update_dataset(id, &dataset)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_dataset(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id, INVALID_DATASET_ID)?;
    state
        .with_conn(move |conn| {
            DatasetService::new(SqliteDatasetRepository::try_new(conn)?).delete_dataset(id)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_entry(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Entry>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Entry>)> {
    let dataset_id = parse_id(&raw_id, INVALID_DATASET_ID)?;
    let Json(entry) = payload?;
    let created = state
        .with_conn(move |conn| {
            EntryService::new(SqliteEntryRepository::try_new(conn)?)
                .create_entry(dataset_id, &entry)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Vec<Entry>>> {
    let dataset_id = parse_id(&raw_id, INVALID_DATASET_ID)?;
    let entries = state
        .with_conn(move |conn| {
            DatasetService::new(SqliteDatasetRepository::try_new(conn)?)
                .require_dataset(dataset_id)?;
            EntryService::new(SqliteEntryRepository::try_new(conn)?).list_entries(dataset_id)
        })
        .await?;
    Ok(Json(entries))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Entry>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id, INVALID_ENTRY_ID)?;
    let Json(entry) = payload?;
    state
        .with_conn(move |conn| {
            EntryService::new(SqliteEntryRepository::try_new(conn)?).update_entry(id, &entry)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&raw_id, INVALID_ENTRY_ID)?;
    state
        .with_conn(move |conn| {
            EntryService::new(SqliteEntryRepository::try_new(conn)?).delete_entry(id)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn project_until_target(
    state: State<AppState>,
    path: Path<String>,
) -> ApiResult<Json<Vec<Entry>>> {
    project(state, path, ProjectionMode::Target).await
}

pub async fn project_until_end_date(
    state: State<AppState>,
    path: Path<String>,
) -> ApiResult<Json<Vec<Entry>>> {
    project(state, path, ProjectionMode::EndDate).await
}

async fn project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mode: ProjectionMode,
) -> ApiResult<Json<Vec<Entry>>> {
    let dataset_id = parse_id(&raw_id, INVALID_DATASET_ID)?;
    let projector = state.projector();
    let entries = state
        .with_conn(move |conn| {
            ProjectionService::with_projector(
                SqliteDatasetRepository::try_new(conn)?,
                SqliteEntryRepository::try_new(conn)?,
                projector,
            )
            .project(dataset_id, mode)
        })
        .await?;
    Ok(Json(entries))
}

fn parse_id(raw: &str, message: &'static str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(message))
}
