// Connection handling module
// Accepts a single TCP connection and serves it with hyper

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::PerformanceConfig;
use crate::logger;

/// Per-connection settings derived from `[performance]`
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub keep_alive: bool,
    pub timeout: Duration,
    pub max_connections: Option<usize>,
}

impl ConnectionSettings {
    pub fn from_config(config: &PerformanceConfig) -> Self {
        Self {
            keep_alive: config.keep_alive_timeout > 0,
            timeout: Duration::from_secs(std::cmp::max(config.read_timeout, config.write_timeout)),
            max_connections: config
                .max_connections
                .map(|max| usize::try_from(max).unwrap_or(usize::MAX)),
        }
    }
}

/// Accept and process a connection, checking limits and logging.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `settings` - Keep-alive, timeout and connection limit
/// * `conn_counter` - Active connection counter
/// * `service` - Turns each request on the connection into a response
pub fn accept_connection<S, Fut>(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    settings: &ConnectionSettings,
    conn_counter: &Arc<AtomicUsize>,
    service: S,
) where
    S: Fn(hyper::Request<Incoming>) -> Fut + 'static,
    Fut: Future<Output = Result<hyper::Response<Full<Bytes>>, Infallible>> + 'static,
{
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = settings.max_connections {
        if prev_count >= max_conn {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, settings.clone(), Arc::clone(conn_counter), service);
}

/// Serve one connection in a local task.
///
/// A request whose handler never finishes holds the connection until the
/// timeout fires; nothing else cancels it.
fn handle_connection<S, Fut>(
    stream: tokio::net::TcpStream,
    settings: ConnectionSettings,
    conn_counter: Arc<AtomicUsize>,
    service: S,
) where
    S: Fn(hyper::Request<Incoming>) -> Fut + 'static,
    Fut: Future<Output = Result<hyper::Response<Full<Bytes>>, Infallible>> + 'static,
{
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(settings.keep_alive);

        let conn = builder.serve_connection(io, service_fn(service));

        match tokio::time::timeout(settings.timeout, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection timeout after {} seconds",
                    settings.timeout.as_secs()
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_config() {
        let config = PerformanceConfig {
            keep_alive_timeout: 0,
            read_timeout: 10,
            write_timeout: 45,
            max_connections: Some(16),
        };
        let settings = ConnectionSettings::from_config(&config);
        assert!(!settings.keep_alive);
        assert_eq!(settings.timeout, Duration::from_secs(45));
        assert_eq!(settings.max_connections, Some(16));
    }
}
