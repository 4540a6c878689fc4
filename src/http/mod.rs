//! HTTP layer
//!
//! Request/response model shared by the router, middleware and handlers,
//! plus body decoding and the small helpers static assets need.

pub mod body;
pub mod cache;
pub mod mime;
pub mod request;
pub mod response;

pub use request::{BodyMap, Request};
pub use response::Response;
