//! HTTP API over the tracker core.
//!
//! # Responsibility
//! - Expose dataset/entry CRUD and the two projection views as JSON routes.
//! - Translate repository errors into HTTP statuses.
//!
//! # Invariants
//! - Handlers never hold the connection lock across an `.await`.
//! - Projection requests always run with a bounded `Projector`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use routes::build_router;
pub use state::AppState;
