//! Routing module
//!
//! Provides route registration and dispatch:
//! - Path patterns with literal and `:name` segments
//! - First-registered-wins matching on (method, path)
//! - Router-wide and per-route middleware
//! - Mounting child routers under a prefix

mod pattern;
mod router;

pub use pattern::PathPattern;
pub use router::{not_found, RouteEntry, Router};
