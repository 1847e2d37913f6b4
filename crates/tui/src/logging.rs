use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Directives enabling `level` for the client crates only.
pub fn filter_directives(level: &str) -> String {
    format!("budget_tui={level},engine={level}")
}

/// Installs the global subscriber, appending to `log_file`.
///
/// The terminal belongs to the UI, so nothing is written to stdout or stderr.
pub fn init(log_file: &str, level: &str) -> Result<()> {
    if let Some(parent) = Path::new(log_file).parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let filter = EnvFilter::try_new(filter_directives(level))
        .map_err(|err| AppError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
