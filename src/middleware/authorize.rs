//! Query-string identity gate

use hyper::StatusCode;
use serde::Serialize;

use super::{Flow, Middleware};
use crate::config::AuthConfig;
use crate::http::{Request, Response};
use crate::logger;

const USER_KEY: &str = "user";
const UNAUTHORIZED_BODY: &str = "<h2>Unauthorized!</h2>";

/// Identity attached to requests that pass the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub id: u32,
}

/// Lets a request through only when `?user=` names the allowed user.
///
/// A plain string comparison: no hashing, session or expiry. A missing
/// parameter is treated like any other wrong value, and so is a repeated
/// one (`?user=john&user=peter`).
#[derive(Debug, Clone)]
pub struct Authorize {
    allowed_user: String,
    identity: Identity,
}

impl Authorize {
    pub fn new(allowed_user: impl Into<String>, identity: Identity) -> Self {
        Self {
            allowed_user: allowed_user.into(),
            identity,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.allowed_user.clone(),
            Identity {
                name: config.identity_name.clone(),
                id: config.identity_id,
            },
        )
    }
}

impl Default for Authorize {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

impl Middleware for Authorize {
    fn name(&self) -> &'static str {
        "authorize"
    }

    fn handle(&self, req: &mut Request) -> Flow {
        if matches!(req.query_values(USER_KEY), [user] if *user == self.allowed_user) {
            req.extensions.insert(self.identity.clone());
            Flow::Continue
        } else {
            logger::log_warning(&format!("Unauthorized request to {}", req.path));
            Flow::Respond(Response::html(StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY))
        }
    }
}
