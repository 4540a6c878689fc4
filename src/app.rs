//! Application bootstrap
//!
//! Wires the data source, middleware and routers together in order:
//!
//! ```text
//! Router
//!  ├─ layer: RequestLogger (every request, including static hits and
//!  │         rejected bodies)
//!  ├─ GET  /                        home
//!  ├─ GET  /api/items               Authorize ▶ items
//!  ├─ GET  /api/products            list
//!  ├─ GET  /api/products/:productID single
//!  ├─ /api/people  (nested router)
//!  │    GET / · POST / · POST /postman · PUT /:id · DELETE /:id
//!  ├─ /login       (nested router)
//!  │    POST /
//!  └─ fallback: static assets, else 404
//! ```
//!
//! Routes win over files, so `GET /` is the home page even though the
//! assets directory has an `index.html`; that file stays reachable as
//! `/index.html`.

use hyper::Method;
use std::future::{ready, Future};
use std::sync::Arc;

use crate::config::{Config, HttpConfig};
use crate::data::{Catalog, PeopleStore};
use crate::error::{AppError, Result};
use crate::handler::{login, pages, people, products, StaticAssets};
use crate::http::{Request, Response};
use crate::middleware::{Authorize, Handler, RequestLogger, SharedMiddleware};
use crate::routing::Router;

/// Everything a connection needs to answer requests
pub struct App {
    pub router: Router,
    pub http: HttpConfig,
}

impl App {
    pub fn build(config: &Config) -> Result<Self> {
        let catalog = Catalog::from_config(config.data.catalog_file.as_deref())?;
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: &Config, catalog: Catalog) -> Result<Self> {
        let people = Arc::new(PeopleStore::new(catalog.people.clone()));
        let router = build_router(config, Arc::new(catalog), people)?;
        Ok(Self {
            router,
            http: config.http.clone(),
        })
    }

    pub async fn respond(&self, req: Request) -> Response {
        self.router.dispatch(req).await
    }

    /// Answer a request that could not be decoded, still passing it through
    /// the router-wide middleware
    pub async fn reject(&self, req: Request, err: AppError) -> Response {
        self.router.answer_with(req, err.into_response()).await
    }
}

pub fn build_router(
    config: &Config,
    catalog: Arc<Catalog>,
    store: Arc<PeopleStore>,
) -> Result<Router> {
    let mut router = Router::new();
    if config.logging.access_log {
        router.layer(RequestLogger::new(config.logging.access_log_format.clone()));
    }

    router.get("/", |_req: Request| ready(pages::home()))?;

    let authorize: SharedMiddleware = Arc::new(Authorize::from_config(&config.auth));
    router.route_with(Method::GET, "/api/items", vec![authorize], |req: Request| {
        ready(pages::items(&req))
    })?;

    let listing = Arc::clone(&catalog);
    router.get("/api/products", move |_req: Request| ready(products::list(&listing)))?;
    router.get("/api/products/:productID", move |req: Request| {
        ready(products::single(&catalog, &req))
    })?;

    router.nest("/api/people", people_router(&store)?)?;
    router.nest("/login", login_router()?)?;

    if let Some(assets) = StaticAssets::from_config(&config.assets) {
        let assets = Arc::new(assets);
        router.fallback(move |req: Request| {
            let assets = Arc::clone(&assets);
            async move { assets.respond(req).await }
        });
    }

    Ok(router)
}

fn people_router(store: &Arc<PeopleStore>) -> Result<Router> {
    let mut router = Router::new();
    router
        .get("/", with_store(store, people::list))?
        .post("/", with_store(store, people::create))?
        .post("/postman", with_store(store, people::create_postman))?
        .put("/:id", with_store(store, people::update))?
        .delete("/:id", with_store(store, people::delete))?;
    Ok(router)
}

fn login_router() -> Result<Router> {
    let mut router = Router::new();
    router.post("/", |req: Request| ready(login::login(&req)))?;
    Ok(router)
}

/// Bind a store-taking handler function into a terminal handler
fn with_store<F, Fut>(store: &Arc<PeopleStore>, f: F) -> impl Handler + 'static
where
    F: Fn(Arc<PeopleStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    let store = Arc::clone(store);
    move |req: Request| f(Arc::clone(&store), req)
}
