// File logging; the terminal belongs to the UI

use std::path::Path;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static LOGGER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub const LOG_FILE_NAME: &str = "petnames.log";

const FALLBACK_FILTER: &str = "info";

/// `RUST_LOG` if it parses, else `default_filter` if it parses, else `info`.
fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Install a daily rolling file subscriber under `log_dir`.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing is written to `log_dir`.
pub fn init_logging(log_dir: &Path, default_filter: &str) -> bool {
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // The guard flushes on drop, so it lives for the rest of the process
    let _ = LOGGER_GUARD.set(guard);

    let log_writer_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(build_filter(default_filter))
        .with(log_writer_layer)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_rust_log<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let original = std::env::var("RUST_LOG").ok();
        match value {
            Some(v) => std::env::set_var("RUST_LOG", v),
            None => std::env::remove_var("RUST_LOG"),
        }

        let result = f();

        if let Some(v) = original {
            std::env::set_var("RUST_LOG", v);
        } else {
            std::env::remove_var("RUST_LOG");
        }
        result
    }

    #[test]
    fn test_configured_filter_used_without_rust_log() {
        let filter = with_rust_log(None, || build_filter("petnames=debug"));
        assert_eq!(filter.to_string().to_lowercase(), "petnames=debug");
    }

    #[test]
    fn test_rust_log_overrides_configured_filter() {
        let filter = with_rust_log(Some("warn"), || build_filter("petnames=debug"));
        assert_eq!(filter.to_string().to_lowercase(), "warn");
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_configured_filter() {
        let filter = with_rust_log(Some("petnames=loud"), || build_filter("debug"));
        assert_eq!(filter.to_string().to_lowercase(), "debug");
    }

    #[test]
    fn test_invalid_configured_filter_falls_back_to_info() {
        let filter = with_rust_log(None, || build_filter("petnames=loud"));
        assert_eq!(filter.to_string().to_lowercase(), "info");
    }

    #[test]
    fn test_records_written_to_log_dir() {
        let temp_dir = TempDir::new().unwrap();

        let installed = with_rust_log(None, || init_logging(temp_dir.path(), "info"));
        assert!(installed, "global subscriber should install once");

        let second_dir = TempDir::new().unwrap();
        assert!(
            !init_logging(second_dir.path(), "info"),
            "a second install reports false"
        );

        tracing::info!("log file smoke line");

        let deadline = Instant::now() + Duration::from_secs(5);
        let found = loop {
            let found = fs::read_dir(temp_dir.path())
                .unwrap()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_NAME))
                .any(|entry| {
                    fs::read_to_string(entry.path())
                        .is_ok_and(|contents| contents.contains("log file smoke line"))
                });
            if found || Instant::now() > deadline {
                break found;
            }
            std::thread::sleep(Duration::from_millis(20));
        };

        assert!(found, "log line should reach {LOG_FILE_NAME}* in the log dir");
    }
}
