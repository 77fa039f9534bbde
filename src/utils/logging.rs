//! Tracing subscriber for the service binary

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "push-trigger.log";

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,push_trigger=debug,tower_http=debug"))
}

/// JSON events go to stdout and to `<log_dir>/push-trigger.log.<date>`.
///
/// Dropping the guard flushes the file writer, so `main` holds it until exit.
/// A second call (tests building several apps) leaves the first subscriber in
/// place.
pub fn init_logging(log_dir: &str) -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    let result = tracing_subscriber::registry()
        .with(default_filter())
        .with(
            fmt::layer()
                .json()
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_current_span(true),
        )
        .with(
            fmt::layer()
                .json()
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init();

    if let Err(err) = result {
        eprintln!("tracing subscriber not installed: {}", err);
    }

    guard
}
