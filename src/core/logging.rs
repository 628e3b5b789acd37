//! Logging Setup
//!
//! Installs the global `tracing` subscriber: a human-readable stdout layer
//! and, when a log directory is configured, a JSON file layer written
//! through a daily-rolling non-blocking appender. `log` records from
//! dependencies are forwarded into `tracing`.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// File name prefix of the rolling log files.
pub const LOG_FILE_NAME: &str = "serverprops.log";

/// Filter from `RUST_LOG`, or from the configured directive.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Opens the daily-rolling appender, creating the directory if needed.
fn file_writer(log_dir: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("Failed to create logs directory {}: {}", log_dir.display(), e);
        return None;
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    Some(tracing_appender::non_blocking(file_appender))
}

/// Initialize logging.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process. It is `None` when file logging is disabled
/// or the directory could not be created.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let (writer, guard) = match config.log_dir.as_deref().and_then(file_writer) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    // File layer: JSON for ingestion
    let file_layer = writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .with_target(true)
            .with_filter(env_filter(config))
    });

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .pretty()
        .with_filter(env_filter(config));

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {}", e);
        return guard;
    }

    // Redirect `log` macros to `tracing`
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    tracing::info!(
        filter = %config.filter,
        log_dir = ?config.log_dir,
        "Logging initialized"
    );
    guard
}
