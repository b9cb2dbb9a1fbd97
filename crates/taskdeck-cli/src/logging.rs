//! Tracing setup: warnings to stderr, detail to a daily log file.

use taskdeck_core::config::ClientConfig;
use taskdeck_infrastructure::TaskdeckPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, prelude::*};

const DEFAULT_CONSOLE_FILTER: &str = "warn";
const DEFAULT_FILE_FILTER: &str = "info,taskdeck=debug";

/// Installs the global subscriber. The returned guard flushes the file
/// writer on drop and must be held for the life of the process.
pub fn init(config: &ClientConfig) -> Option<WorkerGuard> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let log_dir = config
        .log_dir
        .clone()
        .or_else(|| TaskdeckPaths::logs_dir().ok());
    let file_appender = log_dir.and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("taskdeck")
            .filename_suffix("log")
            .max_log_files(7)
            .build(dir)
            .ok()
    });

    match file_appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(EnvFilter::new(DEFAULT_FILE_FILTER));
            tracing_subscriber::registry()
                .with(console)
                .with(file)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(console).init();
            tracing::warn!(target: "taskdeck::storage", "Log directory unavailable; file logging disabled");
            None
        }
    }
}
