//! Centralized logging setup with stderr output and an optional log file
//!
//! stdout is reserved for metric records, so console logs go to stderr.

use std::path::Path;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize logging: stderr, plus `log_file` when given
///
/// Both outputs use the same log level from RUST_LOG environment variable.
/// Defaults to "info" level if RUST_LOG is not set.
///
/// The file writer's guard is forgotten to keep it alive for the program lifetime.
pub fn init_logging(log_file: Option<&Path>) {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(stderr_layer).init();
        return;
    };

    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map_or_else(|| "haproxy-collector.log".into(), |name| name.to_owned());

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter()),
        )
        .init();

    // Keep guard alive for the program lifetime
    std::mem::forget(guard);
}
