//! HTTP response model and conversion into hyper responses

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::StatusCode;
use serde::Serialize;

pub const HTML: &str = "text/html; charset=utf-8";
pub const TEXT: &str = "text/plain; charset=utf-8";
pub const JSON: &str = "application/json; charset=utf-8";

/// A response produced by a middleware or terminal handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: content_type.map(ToString::to_string),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn html(status: StatusCode, body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::new(status, Some(HTML), body)
    }

    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::new(status, Some(TEXT), body)
    }

    /// Serialize `value` as JSON; falls back to a 500 if serialization fails
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::new(status, Some(JSON), body),
            Err(e) => {
                crate::logger::log_error(&format!("Failed to serialize response: {e}"));
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Some(JSON),
                    r#"{"error":"Internal server error"}"#,
                )
            }
        }
    }

    pub fn not_modified(etag: &str) -> Self {
        Self::new(StatusCode::NOT_MODIFIED, None, Bytes::new()).with_header("etag", etag)
    }

    /// Attach an extra header; invalid names or values are logged and dropped
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => self.headers.push((name, value)),
            _ => crate::logger::log_warning(&format!("Dropping invalid header {name}: {value}")),
        }
        self
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }

    /// Convert into a hyper response. HEAD requests keep `Content-Length`
    /// but carry no body.
    pub fn into_hyper(self, server_name: &str, is_head: bool) -> hyper::Response<Full<Bytes>> {
        let status = self.status;
        let content_length = self.body.len();
        let body = if is_head { Bytes::new() } else { self.body };

        let mut builder = hyper::Response::builder()
            .status(status)
            .header("Server", server_name)
            .header("Content-Length", content_length);
        if let Some(content_type) = &self.content_type {
            builder = builder.header("Content-Type", content_type.as_str());
        }
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        builder.body(Full::new(body)).unwrap_or_else(|e| {
            log_build_error(status, &e);
            let mut fallback = hyper::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
