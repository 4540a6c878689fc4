//! Request body decoding
//!
//! Bodies arrive either URL-encoded (HTML forms) or as JSON (API clients);
//! both are normalized into a `BodyMap` before handlers run.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use serde_json::Value;

use super::request::BodyMap;
use crate::error::{AppError, Result};

/// Collect the body, refusing anything larger than `limit` bytes
pub async fn collect_limited<B>(body: B, limit: usize) -> Result<Bytes>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(AppError::PayloadTooLarge { limit })
        }
        Err(e) => Err(AppError::bad_request(format!("Failed to read body: {e}"))),
    }
}

/// Decode raw body bytes according to the request's `Content-Type`
pub fn decode(content_type: Option<&str>, bytes: &[u8]) -> Result<BodyMap> {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());

    match mime.as_deref() {
        Some("application/json") => decode_json(bytes),
        Some("application/x-www-form-urlencoded") => Ok(decode_form(bytes)),
        _ => Ok(BodyMap::new()),
    }
}

fn decode_json(bytes: &[u8]) -> Result<BodyMap> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(BodyMap::new());
    }
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::bad_request(format!(
            "JSON body must be an object, got {}",
            json_kind(&other)
        ))),
    }
}

fn decode_form(bytes: &[u8]) -> BodyMap {
    url::form_urlencoded::parse(bytes)
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;

    #[test]
    fn test_decode_form() {
        let body = decode(
            Some("application/x-www-form-urlencoded"),
            b"name=Ann+Lee&role=admin",
        )
        .unwrap();
        assert_eq!(body["name"], "Ann Lee");
        assert_eq!(body["role"], "admin");
    }

    #[test]
    fn test_decode_json_with_charset() {
        let body = decode(
            Some("application/json; charset=utf-8"),
            br#"{"name":"Ann","age":30}"#,
        )
        .unwrap();
        assert_eq!(body["name"], "Ann");
        assert_eq!(body["age"], 30);
    }

    #[test]
    fn test_decode_empty_json_body() {
        let body = decode(Some("application/json"), b"  ").unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_json() {
        let err = decode(Some("application/json"), b"{not json").unwrap_err();
        assert_eq!(err.status(), hyper::StatusCode::BAD_REQUEST);

        let err = decode(Some("application/json"), b"[1,2]").unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_decode_unknown_type_is_empty() {
        assert!(decode(Some("text/plain"), b"name=Ann").unwrap().is_empty());
        assert!(decode(None, b"name=Ann").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collect_limited() {
        let bytes = collect_limited(Full::new(Bytes::from_static(b"hello")), 16)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"hello");

        let err = collect_limited(Full::new(Bytes::from_static(b"hello world")), 4)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge { limit: 4 }));
    }
}
