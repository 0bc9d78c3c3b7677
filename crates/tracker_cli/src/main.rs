//! Command line probe for the tracker core.
//!
//! # Responsibility
//! - Verify `tracker_core` linkage (`ping`, `version`).
//! - Print a dataset projection from a local database file as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracker_core::db::open_db;
use tracker_core::{
    ProjectionMode, ProjectionService, Projector, SqliteDatasetRepository, SqliteEntryRepository,
};

#[derive(Debug, Parser)]
#[command(name = "tracker_cli", version, about = "Dataset tracker command line probe")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the core health-check reply.
    Ping,
    /// Print the core crate version.
    Version,
    /// Print real and projected entries of a dataset.
    Project {
        /// SQLite database file; migrated on open.
        #[arg(long, env = "TRACKER_DB_PATH")]
        db: PathBuf,
        #[arg(long)]
        dataset: i64,
        /// `target` or `end-date`.
        #[arg(long, default_value = "target")]
        mode: ProjectionMode,
        /// Stop after this many projected entries.
        #[arg(long)]
        max: Option<usize>,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Ping => println!("tracker_core ping={}", tracker_core::ping()),
        Command::Version => println!("tracker_core version={}", tracker_core::core_version()),
        Command::Project {
            db,
            dataset,
            mode,
            max,
        } => {
            let conn = open_db(&db)
                .with_context(|| format!("failed to open database {}", db.display()))?;
            let projector = max.map_or_else(Projector::unbounded, Projector::with_max_projected);
            let service = ProjectionService::with_projector(
                SqliteDatasetRepository::try_new(&conn)?,
                SqliteEntryRepository::try_new(&conn)?,
                projector,
            );
            let entries = service
                .project(dataset, mode)
                .with_context(|| format!("failed to project dataset {dataset} ({mode})"))?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use tracker_core::ProjectionMode;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn project_arguments_parse() {
        let cli = Cli::try_parse_from([
            "tracker_cli",
            "project",
            "--db",
            "/tmp/tracker.sqlite3",
            "--dataset",
            "3",
            "--mode",
            "end-date",
            "--max",
            "20",
        ])
        .unwrap();

        match cli.command {
            Command::Project {
                dataset, mode, max, ..
            } => {
                assert_eq!(dataset, 3);
                assert_eq!(mode, ProjectionMode::EndDate);
                assert_eq!(max, Some(20));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result = Cli::try_parse_from([
            "tracker_cli",
            "project",
            "--db",
            "x.sqlite3",
            "--dataset",
            "1",
            "--mode",
            "weekly",
        ]);
        assert!(result.is_err());
    }
}
