// Server module entry
// Listener setup, connection handling and the accept loop

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use std::convert::Infallible;
use std::future::Future;

pub use connection::ConnectionSettings;
pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;

use crate::config::Config;
use crate::error::Result;
use crate::logger;

/// Build the Tokio runtime from `[server]`, bind the configured address and
/// serve `service` until shutdown. Binds once per process.
pub fn run<S, Fut>(config: &Config, service: S) -> Result<()>
where
    S: Fn(hyper::Request<Incoming>) -> Fut + Clone + 'static,
    Fut: Future<Output = std::result::Result<hyper::Response<Full<Bytes>>, Infallible>> + 'static,
{
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = config.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async {
        let addr = config.get_socket_addr()?;
        let listener = create_reusable_listener(addr)?;
        logger::log_server_start(&addr, config);

        let settings = ConnectionSettings::from_config(&config.performance);
        let local = tokio::task::LocalSet::new();
        local
            .run_until(start_server_loop(listener, settings, service))
            .await
    })
}
