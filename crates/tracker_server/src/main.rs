//! Tracker HTTP server entry point.

use anyhow::{anyhow, Context, Result};
use log::{error, info};
use tracker_core::db::open_db;
use tracker_core::{init_logging_with, LoggingConfig, Projector};
use tracker_server::{build_router, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().context("failed to load configuration")?;

    let logging =
        LoggingConfig::new(&config.log_level, config.log_dir.to_string_lossy()).with_stderr();
    init_logging_with(&logging)
        .map_err(|err| anyhow!(err))
        .context("failed to initialize logging")?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    let state = AppState::new(conn, Projector::with_max_projected(config.max_projected));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        "event=server_start module=server status=ok bind_addr={} db_path={} max_projected={}",
        config.bind_addr,
        config.db_path.display(),
        config.max_projected
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=shutdown_signal module=server status=error signal=ctrl_c error={err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("event=shutdown_signal module=server status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
