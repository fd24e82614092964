//! Tracing setup for lyub frontends.
//!
//! All output goes to daily-rotated files under the XDG state directory,
//! never to the terminal: the CLI owns stdout for its own rendering, so log
//! noise there would corrupt it. `RUST_LOG` overrides the configured level
//! when set.

use crate::config::{Config, LoggingConfig};
use crate::error::Error;
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Log files kept before rotation discards the oldest.
const MAX_LOG_FILES: usize = 7;

/// Handle that flushes buffered log writes when dropped.
///
/// The caller keeps this alive for the life of the process; dropping it
/// early silently loses trailing log lines.
pub struct LoggingGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Install the global subscriber, writing to `$XDG_STATE_HOME/lyub/`.
pub fn init(config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    let log_dir = Config::state_dir();
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix("lyub")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| Error::Config(format!("failed to create log appender: {}", e)))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => EnvFilter::new(&config.level),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(LoggingGuard { _guard: guard })
}

/// Best-effort subscriber for tests; repeated calls are a no-op.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Stable path of the current log file (before the rotation date suffix).
pub fn log_file_path() -> PathBuf {
    Config::log_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_is_under_state_dir() {
        let path = log_file_path();
        assert!(path.ends_with("lyub.log"));
        assert!(path.starts_with(Config::state_dir()));
    }

    #[test]
    fn test_init_test_is_repeatable() {
        init_test();
        init_test();
    }
}
