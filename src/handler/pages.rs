//! HTML pages served by the main app

use hyper::StatusCode;

use crate::error::AppError;
use crate::http::{Request, Response};
use crate::middleware::Identity;

pub const HOME_PAGE: &str = r#"<h1>Home Page</h1> <a href="/api/products">Products</a>"#;

/// `GET /`
pub fn home() -> Response {
    Response::html(StatusCode::OK, HOME_PAGE)
}

/// `GET /api/items`, mounted behind the authorize middleware
pub fn items(req: &Request) -> Response {
    let Some(identity) = req.extensions.get::<Identity>() else {
        return AppError::Unauthorized.into_response();
    };
    tracing::info!(user = %identity.name, id = identity.id, "items requested");
    Response::html(
        StatusCode::OK,
        format!("<h1>Items</h1><p>Signed in as {} (#{})</p>", identity.name, identity.id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;

    #[test]
    fn test_home() {
        let resp = home();
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body_str().contains("/api/products"));
    }

    #[test]
    fn test_items_requires_identity() {
        let mut req = Request::new(Method::GET, "/api/items");
        assert_eq!(items(&req).status, StatusCode::UNAUTHORIZED);

        req.extensions.insert(Identity {
            name: "John".to_string(),
            id: 4,
        });
        let resp = items(&req);
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.body_str().contains("John"));
    }
}
