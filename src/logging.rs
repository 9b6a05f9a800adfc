use std::fs;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes tracing once at process start: human-readable lines on
/// stdout plus a daily-rolling JSON file under `logs/`.
///
/// `RUST_LOG` overrides the default `books_etl=info` filter.
pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "etl.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("books_etl=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    // The guard flushes buffered file output on drop; keep it alive for the
    // lifetime of the process.
    std::mem::forget(guard);
}
