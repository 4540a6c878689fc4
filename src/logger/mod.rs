//! Logger module
//!
//! Thin helpers over `tracing` so call sites stay short:
//! - Subscriber setup from `[logging]`
//! - Server lifecycle messages
//! - Access lines written by the request logger middleware
//! - Error and warning logging

mod format;

pub use format::AccessLine;

use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LoggingConfig};
use crate::error::{AppError, Result};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`. Should be called once at
/// startup; a second call reports an error instead of panicking.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Logging(format!("invalid level '{}': {e}", config.level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AppError::Logging(e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("App listening on port: {}...", addr.port());
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(dir) = &config.assets.dir {
        tracing::info!("Static assets: {dir}");
    }
    tracing::info!("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_response(status: u16, size: usize) {
    tracing::debug!("[Response] {status} ({size} bytes)");
}

/// Write an access line in the configured format
pub fn log_access(line: &AccessLine, format: &str) {
    tracing::info!(target: "access", "{}", line.format(format));
}
