//! Error types for peoplehub

use hyper::StatusCode;
use thiserror::Error;

use crate::http::Response;
use crate::middleware::ChainError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No route for {method} {path}")]
    NotFound { method: String, path: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Middleware chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status this error maps to when it reaches a client
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::Json(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as a plain-text response; internal details stay in the log
    pub fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            crate::logger::log_error(&self.to_string());
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };
        Response::text(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = AppError::NotFound {
            method: "GET".to_string(),
            path: "/nope".to_string(),
        };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::PayloadTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            AppError::Logging("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let resp = AppError::Logging("secret detail".to_string()).into_response();
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body_str(), "Internal Server Error");

        let resp = AppError::bad_request("missing field").into_response();
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert!(resp.body_str().contains("missing field"));
    }
}
