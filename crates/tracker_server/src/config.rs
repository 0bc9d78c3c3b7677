//! Server configuration loaded from the process environment.
//!
//! # Invariants
//! - Every variable is optional; defaults match a local development run.
//! - Relative paths are resolved against the working directory, since the
//!   logger only accepts absolute directories.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const BIND_ADDR_VAR: &str = "TRACKER_BIND_ADDR";
pub const DB_PATH_VAR: &str = "TRACKER_DB_PATH";
pub const LOG_DIR_VAR: &str = "TRACKER_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "TRACKER_LOG_LEVEL";
pub const MAX_PROJECTED_VAR: &str = "TRACKER_MAX_PROJECTED";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_FILE: &str = "tracker.sqlite3";
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_MAX_PROJECTED: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    /// Ceiling on synthesized entries per projection request.
    pub max_projected: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    WorkingDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid {key}=`{value}`: {reason}")
            }
            Self::WorkingDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid { .. } => None,
            Self::WorkingDir(err) => Some(err),
        }
    }
}

impl AppConfig {
    /// Reads configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDir)?;
        Self::from_lookup(&cwd, |key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(
        cwd: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_raw = read(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                key: BIND_ADDR_VAR,
                value: bind_raw.clone(),
                reason: err.to_string(),
            })?;

        let db_path = resolve(cwd, read(DB_PATH_VAR).as_deref().unwrap_or(DEFAULT_DB_FILE));
        let log_dir = resolve(cwd, read(LOG_DIR_VAR).as_deref().unwrap_or(DEFAULT_LOG_DIR));
        let log_level = read(LOG_LEVEL_VAR)
            .unwrap_or_else(|| tracker_core::default_log_level().to_string());

        let max_projected = match read(MAX_PROJECTED_VAR) {
            None => DEFAULT_MAX_PROJECTED,
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        key: MAX_PROJECTED_VAR,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Ok(value) => value,
                Err(err) => {
                    return Err(ConfigError::Invalid {
                        key: MAX_PROJECTED_VAR,
                        value: raw,
                        reason: err.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            bind_addr,
            db_path,
            log_dir,
            log_level,
            max_projected,
        })
    }
}

fn resolve(cwd: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
