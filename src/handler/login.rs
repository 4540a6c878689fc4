//! Login endpoint
//!
//! Only checks that a name was supplied; there is no credential
//! verification behind it.

use hyper::StatusCode;

use crate::http::{Request, Response};

/// `POST /login`
pub fn login(req: &Request) -> Response {
    match req.body_text("name") {
        Some(name) => Response::html(
            StatusCode::OK,
            format!("<h3>Welcome {} 🤗</h3>", escape_html(&name)),
        ),
        None => Response::html(
            StatusCode::UNAUTHORIZED,
            "<h3>Please provide credentials! ☹️</h3>",
        ),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::BodyMap;
    use hyper::Method;
    use serde_json::Value;

    fn post(fields: &[(&str, Value)]) -> Request {
        let body: BodyMap = fields
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        Request::new(Method::POST, "/login").with_body(body)
    }

    #[test]
    fn test_welcome() {
        let resp = login(&post(&[("name", Value::from("Ann"))]));
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body_str().contains("Ann"));
        assert!(resp.body_str().starts_with("<h3>Welcome"));
    }

    #[test]
    fn test_missing_name() {
        let resp = login(&post(&[]));
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
        assert!(resp.body_str().contains("Please provide credentials"));

        let resp = login(&post(&[("name", Value::from(""))]));
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_name_follows_js_truthiness() {
        let resp = login(&post(&[("name", Value::from(0))]));
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

        let resp = login(&post(&[("name", Value::from(vec!["a"]))]));
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.body_str(), "<h3>Welcome a 🤗</h3>");
    }

    #[test]
    fn test_name_is_escaped() {
        let resp = login(&post(&[("name", Value::from("<b>x</b>"))]));
        assert!(resp.body_str().contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
