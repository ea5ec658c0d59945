//! CLI entry point.
//!
//! # Responsibility
//! - Open a SQLite-backed project store and run startup load orchestration.
//! - Print the active project's ranking and its share link.
//!
//! Usage: `decision_matrix_cli <db-path> [url]`

use decision_matrix_core::{
    default_log_level, init_logging, LoadSource, ProjectStore, Session, SqliteStorage,
    UrlLocation,
};
use log::{error, info};
use std::process::ExitCode;

const DEFAULT_URL: &str = "https://localhost/decision-matrix/";
const LOG_LEVEL_ENV: &str = "DECISION_MATRIX_LOG_LEVEL";
const LOG_DIR_ENV: &str = "DECISION_MATRIX_LOG_DIR";

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(db_path) = args.next() else {
        eprintln!("usage: decision_matrix_cli <db-path> [url]");
        return ExitCode::from(2);
    };
    let url = args.next().unwrap_or_else(|| DEFAULT_URL.to_string());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let level =
            std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let storage = match SqliteStorage::open(&db_path) {
        Ok(storage) => storage,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(ProjectStore::new(storage), UrlLocation::new(url));
    let outcome = session.start();
    if outcome.source == LoadSource::Sample {
        session.store_mut().seed_sample();
    }
    info!(
        "event=cli_start module=cli status=ok source={:?} loaded={}",
        outcome.source, outcome.loaded
    );

    let store = session.store();
    if let Some(project) = store.active_project() {
        println!("project: {} ({})", project.name, project.id);
    }
    for (rank, option) in store.ranked_options().iter().enumerate() {
        println!("{:>3}. {:<24} {:>8}", rank + 1, option.name, option.score);
    }
    if let Some(url) = session.share_url() {
        println!("share: {url}");
    }
    ExitCode::SUCCESS
}
