//! Request model handed through the middleware chain
//!
//! Wraps the parts of a hyper request that handlers care about, plus the
//! path parameters bound by the dispatcher and an extension slot that
//! middleware can write into.

use hyper::http::Extensions;
use hyper::{HeaderMap, Method};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::num::FpCategory;

/// Decoded request body (form fields or JSON object members)
pub type BodyMap = Map<String, Value>;

#[derive(Debug, Default)]
pub struct Request {
    pub method: Method,
    /// Path without the query string
    pub path: String,
    /// Request target exactly as received (path plus query)
    pub raw_target: String,
    /// Every value of each key, in arrival order
    pub query: HashMap<String, Vec<String>>,
    /// Bound by the dispatcher from `:name` segments
    pub params: HashMap<String, String>,
    pub body: BodyMap,
    pub headers: HeaderMap,
    pub extensions: Extensions,
}

impl Request {
    /// Build a request from a method and a target such as `/api/items?user=john`
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let path = if path.is_empty() { "/" } else { path };

        Self {
            method,
            path: path.to_string(),
            raw_target: target.to_string(),
            query: query.map(parse_query).unwrap_or_default(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: BodyMap) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// First value of `key`
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_values(key).first().map(String::as_str)
    }

    /// All values of `key`; empty when the key is absent
    pub fn query_values(&self, key: &str) -> &[String] {
        self.query.get(key).map_or(&[], Vec::as_slice)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body field as text, if it is truthy in the JavaScript sense.
    ///
    /// `null`, `false`, `0`, empty strings and missing fields count as
    /// absent. Arrays and objects are present even when empty; arrays
    /// render as their comma-joined items and objects as `[object Object]`.
    pub fn body_text(&self, key: &str) -> Option<String> {
        match self.body.get(key)? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64().map(f64::classify) == Some(FpCategory::Zero) => None,
            value => Some(js_text(value)),
        }
    }

    pub const fn is_head(&self) -> bool {
        matches!(self.method, Method::HEAD)
    }
}

/// String conversion as in a JavaScript template literal
fn js_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(js_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Decode a query string, keeping repeated keys
pub fn parse_query(query: &str) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        map.entry(key.into_owned()).or_default().push(value.into_owned());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_splits_query() {
        let req = Request::new(Method::GET, "/api/items?user=john&page=2");
        assert_eq!(req.path, "/api/items");
        assert_eq!(req.raw_target, "/api/items?user=john&page=2");
        assert_eq!(req.query_param("user"), Some("john"));
        assert_eq!(req.query_param("page"), Some("2"));
        assert_eq!(req.query_param("missing"), None);
    }

    #[test]
    fn test_new_without_query() {
        let req = Request::new(Method::GET, "/about");
        assert_eq!(req.path, "/about");
        assert!(req.query.is_empty());

        let req = Request::new(Method::GET, "?user=john");
        assert_eq!(req.path, "/");
    }

    #[test]
    fn test_query_decoding_and_duplicates() {
        let query = parse_query("name=Ann+Lee&city=K%C3%B6ln&name=other");
        assert_eq!(query["name"], vec!["Ann Lee", "other"]);
        assert_eq!(query["city"], vec!["Köln"]);

        let req = Request::new(Method::GET, "/?name=Ann&name=Bob");
        assert_eq!(req.query_param("name"), Some("Ann"));
        assert_eq!(req.query_values("name"), ["Ann", "Bob"]);
        assert!(req.query_values("missing").is_empty());
    }

    #[test]
    fn test_body_text_truthiness() {
        let json = json!({
            "name": "Ann",
            "empty": "",
            "nothing": null,
            "count": 3,
            "zero": 0,
            "off": false,
            "list": ["a", "b"],
            "object": {"first": "Ann"},
        });
        let Value::Object(body) = json else {
            panic!("expected object");
        };
        let req = Request::new(Method::POST, "/login").with_body(body);

        assert_eq!(req.body_text("name"), Some("Ann".to_string()));
        assert_eq!(req.body_text("count"), Some("3".to_string()));
        assert_eq!(req.body_text("empty"), None);
        assert_eq!(req.body_text("nothing"), None);
        assert_eq!(req.body_text("off"), None);
        assert_eq!(req.body_text("zero"), None);
        assert_eq!(req.body_text("list"), Some("a,b".to_string()));
        assert_eq!(req.body_text("object"), Some("[object Object]".to_string()));
        assert_eq!(req.body_text("absent"), None);
    }
}
