//! Manual dispatcher for the raw server
//!
//! No router, no middleware: the full request target is compared against a
//! fixed set of pages. Method is ignored and a query string makes the
//! target miss (`/about?x=1` is a 404).

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::StatusCode;
use std::convert::Infallible;
use std::sync::Arc;

use crate::http::Response;
use crate::logger;

const CONTENT_TYPE: &str = "text/html";

pub fn dispatch(target: &str) -> Response {
    let (status, body) = match target {
        "/" => (StatusCode::OK, "<h1>home page</h1>"),
        "/about" => (StatusCode::OK, "<h1>about page</h1>"),
        "/contact" => (StatusCode::OK, "<h1>Contact Info Page</h1>"),
        _ => (StatusCode::NOT_FOUND, "<h1>page not found</h1>"),
    };
    Response::new(status, Some(CONTENT_TYPE), body)
}

/// hyper service function for the raw server
pub async fn handle_request<B>(
    req: hyper::Request<B>,
    server_name: Arc<str>,
) -> Result<hyper::Response<Full<Bytes>>, Infallible> {
    let target = req.uri().path_and_query().map_or("/", |pq| pq.as_str());
    let response = dispatch(target);
    logger::log_response(response.status.as_u16(), response.body.len());
    Ok(response.into_hyper(&server_name, req.method() == hyper::Method::HEAD))
}
