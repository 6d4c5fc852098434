//! Tracing subscribers for the propcast binary
//!
//! Console output always goes to stderr; stdout carries the report.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Prefix of the daily log files; the date is appended as `.YYYY-MM-DD`
pub const LOG_FILE_PREFIX: &str = "propcast.log";

/// Directive used when `RUST_LOG` is unset: other crates at warn, propcast at `level`
pub fn default_directive(level: &str) -> String {
    format!("warn,propcast={level}")
}

/// Daily-rotated log file under `log_dir`, creating the directory if needed.
///
/// Returns an error when today's file cannot be opened for writing.
pub fn daily_file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
}

/// Console logging on stderr, plus a daily log file when PROPCAST_LOG_DIR is set.
///
/// The returned guard flushes the file writer on drop and must outlive the run.
pub fn init_logging(level: &str) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let (file_layer, guard) = match std::env::var("PROPCAST_LOG_DIR") {
        Ok(log_dir) => match daily_file_appender(Path::new(&log_dir)) {
            Ok(file_appender) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                let layer = tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not open log file in {} ({}), file logging disabled",
                    log_dir, e
                );
                (None, None)
            }
        },
        Err(_) => (None, None),
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Minimal logging for commands that never touch the network
pub fn init_logging_simple() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "propcast-logging-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        let _ = fs::remove_file(&dir);
        dir
    }

    #[test]
    fn test_default_directive_scopes_level_to_crate() {
        assert_eq!(default_directive("info"), "warn,propcast=info");
        assert_eq!(default_directive("debug"), "warn,propcast=debug");
    }

    #[test]
    fn test_appender_creates_missing_directory() {
        let dir = scratch_dir("fresh").join("nested");
        let appender = daily_file_appender(&dir);
        assert!(appender.is_ok());

        let created = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX));
        assert!(created, "expected a {LOG_FILE_PREFIX}.* file in {}", dir.display());

        drop(appender);
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_appender_errors_when_todays_file_is_a_directory() {
        let dir = scratch_dir("blocked");
        // Rotation names files by the UTC date
        let today = chrono::Utc::now().format("%Y-%m-%d");
        fs::create_dir_all(dir.join(format!("{LOG_FILE_PREFIX}.{today}"))).unwrap();

        let result = daily_file_appender(&dir);
        assert!(result.is_err(), "log file path is a directory, appender must not open");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_appender_errors_when_log_dir_is_a_file() {
        let path = scratch_dir("plain-file");
        fs::write(&path, b"not a directory").unwrap();

        assert!(daily_file_appender(&path).is_err());

        let _ = fs::remove_file(&path);
    }
}
