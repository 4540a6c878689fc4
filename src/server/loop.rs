// Server loop module
// Accepts connections until a shutdown signal arrives

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use std::convert::Infallible;
use std::future::Future;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::{accept_connection, ConnectionSettings};
use super::signal::shutdown_signal;
use crate::error::Result;
use crate::logger;

/// Accept loop; must run inside a `LocalSet` since connections are served
/// with `spawn_local`
pub async fn start_server_loop<S, Fut>(
    listener: TcpListener,
    settings: ConnectionSettings,
    service: S,
) -> Result<()>
where
    S: Fn(hyper::Request<Incoming>) -> Fut + Clone + 'static,
    Fut: Future<Output = std::result::Result<hyper::Response<Full<Bytes>>, Infallible>> + 'static,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &settings,
                            &active_connections,
                            service.clone(),
                        );
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = &mut shutdown => {
                tracing::info!("Stopped accepting connections");
                return Ok(());
            }
        }
    }
}
