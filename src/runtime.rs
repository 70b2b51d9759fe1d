//! Tokio runtime setup and startup utilities for the collector binary
//!
//! This module provides:
//! - Runtime construction
//! - Configuration loading with CLI/env overrides and startup logging
//! - Shutdown signal handling

use crate::args::Args;
use crate::config::{CollectorSettings, load_config_with_fallback};
use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::info;

/// Build the tokio runtime
///
/// The collector does one thing at a time, so a current-thread runtime is
/// all it needs.
///
/// # Errors
/// Returns error if runtime creation fails
pub fn build_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM on Unix)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Spawn a task that turns the shutdown signal into a stop request
///
/// Must be called from within the runtime.
#[must_use]
pub fn spawn_shutdown_handler() -> watch::Receiver<bool> {
    let (stop_tx, stop_rx) = watch::channel(false);

    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, stopping after the current cycle");
        let _ = stop_tx.send(true);
    });

    stop_rx
}

/// Load configuration, apply overrides, and log what will be collected
///
/// # Errors
/// Returns error if the config file cannot be read or parsed, or if the
/// merged configuration is invalid
pub fn load_settings(args: &Args) -> Result<CollectorSettings> {
    let (mut config, source) = load_config_with_fallback(&args.config)?;
    args.apply_to(&mut config);

    let settings = config
        .resolve()
        .with_context(|| format!("Invalid configuration ({})", source.description()))?;

    info!("Loaded configuration from {}", source.description());
    info!("Collecting from {}", settings.transport);
    info!(
        "Reporting as '{}' every {:?} (fetch timeout {:?})",
        settings.source, settings.poll_interval, settings.fetch_timeout
    );
    if settings.filter.is_active() {
        info!("Reporting {} selected proxies", settings.filter.len());
    } else {
        info!("Reporting all frontends and backends");
    }

    Ok(settings)
}
