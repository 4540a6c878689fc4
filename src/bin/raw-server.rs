//! Bare server without router or middleware; matches the request target
//! against three fixed pages.

use std::sync::Arc;

use peoplehub::config::Config;
use peoplehub::{logger, raw, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = match std::env::args().nth(1) {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    logger::init(&cfg.logging)?;

    let server_name: Arc<str> = Arc::from(cfg.http.server_name.as_str());
    server::run(&cfg, move |req| raw::handle_request(req, Arc::clone(&server_name)))?;
    Ok(())
}
