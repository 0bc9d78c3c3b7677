//! Router assembly.

use crate::handlers::{
    create_dataset, create_entry, delete_dataset, delete_entry, get_dataset, healthcheck,
    list_datasets, list_entries, project_until_end_date, project_until_target, update_dataset,
    update_entry,
};
use crate::state::AppState;
use axum::http::{header, Method};
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/datasets", get(list_datasets).post(create_dataset))
        .route(
            "/datasets/{id}",
            get(get_dataset).put(update_dataset).delete(delete_dataset),
        )
        .route(
            "/datasets/{id}/entries",
            get(list_entries).post(create_entry),
        )
        .route(
            "/datasets/{id}/entries/projected/target",
            get(project_until_target),
        )
        .route(
            "/datasets/{id}/entries/projected/endDate",
            get(project_until_end_date),
        )
        .route("/entries/{id}", put(update_entry).delete(delete_entry))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers([header::CONTENT_TYPE])
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .with_state(state)
}
