//! Request entry point
//!
//! Converts hyper requests into the app's request model, runs them through
//! the app and converts the answer back.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use std::convert::Infallible;
use std::sync::Arc;

use crate::app::App;
use crate::error::Result;
use crate::http::{body, BodyMap, Request};
use crate::logger;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: hyper::Request<B>,
    app: Arc<App>,
) -> std::result::Result<hyper::Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (request, decoded) = into_request(req, app.http.max_body_size).await;
    let is_head = request.is_head();

    let response = match decoded {
        Ok(body) => app.respond(request.with_body(body)).await,
        Err(e) => {
            logger::log_warning(&format!("Rejected request body: {e}"));
            app.reject(request, e).await
        }
    };

    logger::log_response(response.status.as_u16(), response.body.len());
    Ok(response.into_hyper(&app.http.server_name, is_head))
}

/// Split a hyper request into a body-less [`Request`] and its decoded body.
///
/// The request is returned even when the body is unreadable so the caller
/// can still run it past the middleware.
pub async fn into_request<B>(
    req: hyper::Request<B>,
    max_body_size: usize,
) -> (Request, Result<BodyMap>)
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let (parts, incoming) = req.into_parts();
    let target = parts
        .uri
        .path_and_query()
        .map_or("/", |pq| pq.as_str());
    let request = Request::new(parts.method, target).with_headers(parts.headers);

    let content_type = request.header("content-type").map(ToString::to_string);
    let decoded = match body::collect_limited(incoming, max_body_size).await {
        Ok(bytes) => body::decode(content_type.as_deref(), &bytes),
        Err(e) => Err(e),
    };
    (request, decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::middleware::Flow;
    use http_body_util::BodyExt;
    use hyper::{Method, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn app() -> Arc<App> {
        let mut config = Config::default();
        config.assets.dir = None;
        Arc::new(App::build(&config).unwrap())
    }

    fn counted_app() -> (Arc<App>, Arc<AtomicUsize>) {
        let mut config = Config::default();
        config.assets.dir = None;
        let mut app = App::build(&config).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        app.router.layer(move |_req: &mut Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            Flow::Continue
        });
        (Arc::new(app), hits)
    }

    fn request(method: Method, uri: &str, content_type: Option<&str>, body: &str) -> hyper::Request<Full<Bytes>> {
        let mut builder = hyper::Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Full::new(Bytes::from(body.to_string()))).unwrap()
    }

    async fn body_of(resp: hyper::Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_into_request_decodes_form() {
        let req = request(
            Method::POST,
            "/login?lang=en",
            Some("application/x-www-form-urlencoded"),
            "name=Ann",
        );
        let (parsed, body) = into_request(req, 1024).await;
        let parsed = parsed.with_body(body.unwrap());
        assert_eq!(parsed.path, "/login");
        assert_eq!(parsed.query_param("lang"), Some("en"));
        assert_eq!(parsed.body_text("name"), Some("Ann".to_string()));
        assert_eq!(parsed.header("content-type"), Some("application/x-www-form-urlencoded"));
    }

    #[tokio::test]
    async fn test_login_over_json() {
        let req = request(Method::POST, "/login", Some("application/json"), r#"{"name":"Ann"}"#);
        let resp = handle_request(req, app()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["server"], "peoplehub");
        assert!(body_of(resp).await.contains("Ann"));
    }

    #[tokio::test]
    async fn test_bad_json_is_400() {
        let req = request(Method::POST, "/api/people/postman", Some("application/json"), "{oops");
        let resp = handle_request(req, app()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let big = format!("name={}", "a".repeat(200_000));
        let req = request(Method::POST, "/login", Some("application/x-www-form-urlencoded"), &big);
        let resp = handle_request(req, app()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_rejected_bodies_pass_the_layers() {
        let (app, hits) = counted_app();

        let req = request(Method::POST, "/api/people", Some("application/json"), "[1]");
        let resp = handle_request(req, Arc::clone(&app)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let big = format!("name={}", "a".repeat(200_000));
        let req = request(Method::POST, "/login", Some("application/x-www-form-urlencoded"), &big);
        let resp = handle_request(req, app).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let req = request(Method::HEAD, "/", None, "");
        let resp = handle_request(req, app()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_of(resp).await.is_empty());
    }
}
