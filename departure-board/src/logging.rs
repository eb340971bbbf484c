//! Tracing setup.
//!
//! The terminal belongs to the UI, so log output goes to a file.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "departure-board.log";

/// `departure-board.log` in the system temp directory.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Filter from `RUST_LOG`, falling back to `info` when unset or invalid.
fn env_filter() -> EnvFilter {
    let default_level = LevelFilter::INFO;
    let rust_log =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    })
}

/// Install the global subscriber, appending to `path` (or the default log
/// file). Returns the file logs now go to.
///
/// Fails if a global subscriber is already installed; the existing one is
/// left in place.
pub fn init_logging(path: Option<&Path>) -> io::Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter())
        .with(layer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(path)
}
