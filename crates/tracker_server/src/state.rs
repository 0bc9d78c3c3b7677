//! Shared handler state.

use crate::error::{ApiError, ApiResult};
use log::error;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracker_core::{Projector, RepoResult};

#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
    projector: Projector,
}

impl AppState {
    /// Wraps a connection returned by `tracker_core::db::open_db*`.
    pub fn new(conn: Connection, projector: Projector) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
            projector,
        }
    }

    pub fn projector(&self) -> Projector {
        self.projector
    }

    /// Runs `work` on the blocking pool with exclusive access to the connection.
    pub async fn with_conn<T, F>(&self, work: F) -> ApiResult<T>
    where
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|_| ApiError::internal("database connection lock poisoned"))?;
            work(&conn).map_err(ApiError::from)
        })
        .await
        .map_err(|err| {
            error!("event=db_task module=server status=error error={err}");
            ApiError::internal("database task failed")
        })?
    }
}
