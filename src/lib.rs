//! peoplehub
//!
//! A small web application framework (request/response model, router,
//! middleware chain) and the demo application built on it: static assets,
//! a products catalog, a people API and a login form.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod middleware;
pub mod raw;
pub mod routing;
pub mod server;

pub use app::App;
pub use error::{AppError, Result};
