use std::sync::Arc;

use peoplehub::config::Config;
use peoplehub::{handler, logger, server, App};

/// Usage: `peoplehub [CONFIG]`, where CONFIG is a config file path without
/// its extension
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    logger::init(&cfg.logging)?;

    let app = Arc::new(App::build(&cfg)?);
    tracing::info!("{} routes registered", app.router.routes().count());

    server::run(&cfg, move |req| handler::handle_request(req, Arc::clone(&app)))?;
    Ok(())
}
