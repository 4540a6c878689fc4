//! Request handler module
//!
//! Terminal handlers for the app's routes, static asset serving, and the
//! hyper-facing entry point that turns connections' requests into
//! responses.

pub mod login;
pub mod pages;
pub mod people;
pub mod products;
pub mod router;
pub mod static_files;

pub use router::handle_request;
pub use static_files::StaticAssets;
