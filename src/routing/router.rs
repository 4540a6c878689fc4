//! Route table and dispatcher

use hyper::Method;
use std::collections::HashMap;
use std::future::ready;
use std::sync::Arc;

use super::pattern::PathPattern;
use crate::error::{AppError, Result};
use crate::http::{Request, Response};
use crate::logger;
use crate::middleware::{Chain, ChainError, Handler, Middleware, SharedHandler, SharedMiddleware};

/// A (method, pattern) binding to its middleware and terminal handler
#[derive(Clone)]
pub struct RouteEntry {
    pub method: Method,
    pub pattern: PathPattern,
    middleware: Vec<SharedMiddleware>,
    handler: SharedHandler,
}

impl RouteEntry {
    fn accepts(&self, method: &Method) -> bool {
        self.method == method || (method == Method::HEAD && self.method == Method::GET)
    }
}

pub struct Router {
    layers: Vec<SharedMiddleware>,
    routes: Vec<RouteEntry>,
    fallback: SharedHandler,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            routes: Vec::new(),
            fallback: Arc::new(not_found),
        }
    }

    /// Add router-wide middleware; runs before per-route middleware, in
    /// registration order, for matched and unmatched requests alike
    pub fn layer(&mut self, middleware: impl Middleware + 'static) -> &mut Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Replace the terminal handler used when nothing matches
    pub fn fallback(&mut self, handler: impl Handler + 'static) -> &mut Self {
        self.fallback = Arc::new(handler);
        self
    }

    pub fn route(
        &mut self,
        method: Method,
        pattern: &str,
        handler: impl Handler + 'static,
    ) -> Result<&mut Self> {
        self.route_with(method, pattern, Vec::new(), handler)
    }

    pub fn route_with(
        &mut self,
        method: Method,
        pattern: &str,
        middleware: Vec<SharedMiddleware>,
        handler: impl Handler + 'static,
    ) -> Result<&mut Self> {
        self.routes.push(RouteEntry {
            method,
            pattern: PathPattern::parse(pattern)?,
            middleware,
            handler: Arc::new(handler),
        });
        Ok(self)
    }

    pub fn get(&mut self, pattern: &str, handler: impl Handler + 'static) -> Result<&mut Self> {
        self.route(Method::GET, pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: impl Handler + 'static) -> Result<&mut Self> {
        self.route(Method::POST, pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: impl Handler + 'static) -> Result<&mut Self> {
        self.route(Method::PUT, pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: impl Handler + 'static) -> Result<&mut Self> {
        self.route(Method::DELETE, pattern, handler)
    }

    /// Mount `child` under `prefix`.
    ///
    /// The child's router-wide middleware becomes per-route middleware of the
    /// mounted entries; its fallback is dropped.
    pub fn nest(&mut self, prefix: &str, child: Self) -> Result<&mut Self> {
        PathPattern::parse(prefix)?;
        for entry in child.routes {
            let mut middleware = child.layers.clone();
            middleware.extend(entry.middleware);
            self.routes.push(RouteEntry {
                method: entry.method,
                pattern: entry.pattern.prefixed(prefix)?,
                middleware,
                handler: entry.handler,
            });
        }
        Ok(self)
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter()
    }

    /// First registered entry accepting `method` whose pattern matches `path`
    pub fn find(&self, method: &Method, path: &str) -> Option<(&RouteEntry, HashMap<String, String>)> {
        self.routes
            .iter()
            .filter(|entry| entry.accepts(method))
            .find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
    }

    /// Router-wide middleware followed by the entry's own
    pub fn chain_for(&self, entry: &RouteEntry) -> Chain {
        let middleware = self
            .layers
            .iter()
            .chain(entry.middleware.iter())
            .cloned()
            .collect();
        Chain::new(middleware, Arc::clone(&entry.handler))
    }

    /// Run the matching chain, or the router-wide middleware plus the
    /// fallback when nothing matches
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let chain = match self.find(&req.method, &req.path) {
            Some((entry, params)) => {
                req.params = params;
                self.chain_for(entry)
            }
            None => Chain::new(self.layers.clone(), Arc::clone(&self.fallback)),
        };
        finish(chain.run(req).await)
    }

    /// Run only the router-wide middleware, then answer with `resp`.
    ///
    /// For requests rejected before routing (unreadable bodies) so the
    /// layers still see them.
    pub async fn answer_with(&self, req: Request, resp: Response) -> Response {
        let handler: SharedHandler = Arc::new(move |_req: Request| ready(resp.clone()));
        finish(Chain::new(self.layers.clone(), handler).run(req).await)
    }
}

fn finish(result: std::result::Result<Response, ChainError>) -> Response {
    match result {
        Ok(resp) => resp,
        Err(e) => {
            logger::log_error(&format!("Middleware chain misuse: {e}"));
            AppError::from(e).into_response()
        }
    }
}

/// Default fallback: 404 naming the method and path
pub async fn not_found(req: Request) -> Response {
    AppError::NotFound {
        method: req.method.to_string(),
        path: req.path,
    }
    .into_response()
}
