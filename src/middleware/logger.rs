//! Access logging middleware

use chrono::Local;

use super::{Flow, Middleware};
use crate::http::Request;
use crate::logger::{self, AccessLine};

/// Writes one access line per request, then always continues
#[derive(Debug, Clone)]
pub struct RequestLogger {
    format: String,
}

impl RequestLogger {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn line_for(req: &Request) -> AccessLine {
        AccessLine {
            method: req.method.to_string(),
            target: req.raw_target.clone(),
            time: Local::now(),
        }
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new("short")
    }
}

impl Middleware for RequestLogger {
    fn name(&self) -> &'static str {
        "logger"
    }

    fn handle(&self, req: &mut Request) -> Flow {
        logger::log_access(&Self::line_for(req), &self.format);
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use hyper::Method;

    #[test]
    fn test_always_continues() {
        let logger = RequestLogger::default();
        for method in [Method::GET, Method::POST, Method::DELETE] {
            let mut req = Request::new(method, "/anything?x=1");
            assert!(matches!(logger.handle(&mut req), Flow::Continue));
        }
    }

    #[test]
    fn test_line_uses_full_target() {
        let req = Request::new(Method::GET, "/api/items?user=john");
        let line = RequestLogger::line_for(&req);
        assert_eq!(line.method, "GET");
        assert_eq!(line.target, "/api/items?user=john");
        assert_eq!(line.time.year(), Local::now().year());
    }
}
