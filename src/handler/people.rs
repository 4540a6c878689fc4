//! People endpoints
//!
//! `create` serves HTML forms and answers with the new name only;
//! `create_postman` serves JSON clients and answers with the full list.

use hyper::StatusCode;
use serde_json::json;
use std::sync::Arc;

use crate::data::PeopleStore;
use crate::http::{Request, Response};

const NAME_REQUIRED: &str = "please provide name value";
const IDS_EXHAUSTED: &str = "no free person id";

/// `GET /api/people`
pub async fn list(store: Arc<PeopleStore>, _req: Request) -> Response {
    let people = store.list().await;
    Response::json(StatusCode::OK, &json!({ "success": true, "data": people }))
}

/// `POST /api/people`
pub async fn create(store: Arc<PeopleStore>, req: Request) -> Response {
    let Some(name) = req.body_text("name") else {
        return failure(StatusCode::BAD_REQUEST, NAME_REQUIRED);
    };
    if store.create(&name).await.is_none() {
        return failure(StatusCode::CONFLICT, IDS_EXHAUSTED);
    }
    Response::json(StatusCode::CREATED, &json!({ "success": true, "person": name }))
}

/// `POST /api/people/postman`
pub async fn create_postman(store: Arc<PeopleStore>, req: Request) -> Response {
    let Some(name) = req.body_text("name") else {
        return failure(StatusCode::BAD_REQUEST, NAME_REQUIRED);
    };
    if store.create(&name).await.is_none() {
        return failure(StatusCode::CONFLICT, IDS_EXHAUSTED);
    }
    let people = store.list().await;
    Response::json(StatusCode::CREATED, &json!({ "success": true, "data": people }))
}

/// `PUT /api/people/:id`
///
/// An unknown id wins over a missing name: both absent gives 404.
pub async fn update(store: Arc<PeopleStore>, req: Request) -> Response {
    let raw_id = req.param("id").unwrap_or_default();
    let Ok(id) = raw_id.parse::<u32>() else {
        return no_person(raw_id);
    };

    let Some(name) = req.body_text("name") else {
        return if store.list().await.iter().any(|p| p.id == id) {
            failure(StatusCode::BAD_REQUEST, NAME_REQUIRED)
        } else {
            no_person(raw_id)
        };
    };

    match store.rename(id, &name).await {
        Some(people) => Response::json(StatusCode::OK, &json!({ "success": true, "data": people })),
        None => no_person(raw_id),
    }
}

/// `DELETE /api/people/:id`
pub async fn delete(store: Arc<PeopleStore>, req: Request) -> Response {
    let raw_id = req.param("id").unwrap_or_default();
    let removed = match raw_id.parse::<u32>() {
        Ok(id) => store.remove(id).await,
        Err(_) => None,
    };

    match removed {
        Some(people) => Response::json(StatusCode::OK, &json!({ "success": true, "data": people })),
        None => no_person(raw_id),
    }
}

fn no_person(raw_id: &str) -> Response {
    failure(StatusCode::NOT_FOUND, &format!("no person with id {raw_id}"))
}

fn failure(status: StatusCode, msg: &str) -> Response {
    Response::json(status, &json!({ "success": false, "msg": msg }))
}
