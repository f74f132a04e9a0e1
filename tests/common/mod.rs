#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use orgnest_api::app::{app, AppState};
use orgnest_api::storage::LocalStorage;
use orgnest_api::store::MemoryStore;

/// In-process application: in-memory store, content store rooted in a
/// temp directory, routed through the real router and middleware.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub storage_root: tempfile::TempDir,
}

pub fn test_app() -> TestApp {
    let storage_root = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(MemoryStore::new());

    let state = AppState {
        store: store.clone(),
        files: Arc::new(LocalStorage::new(storage_root.path())),
    };

    TestApp {
        router: app(state),
        store,
        storage_root,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw_body: Vec<u8>,
}

/// Drive one request through the router. Non-JSON bodies (the CSV export)
/// come back in `raw_body` with `body` set to null.
pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let raw_body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec();
    let body = serde_json::from_slice(&raw_body).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
        raw_body,
    }
}

/// Register an account and return `(access_token, user_id)`.
pub async fn register(router: &Router, name: &str, email: &str) -> (String, String) {
    let response = request(
        router,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "password" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED, "register failed: {}", response.body);
    let token = response.body["access_token"].as_str().expect("token").to_string();
    let user_id = response.body["data"]["user"]["id"]
        .as_str()
        .expect("user id")
        .to_string();
    (token, user_id)
}

/// Create an organization as the given principal; returns its org_id.
pub async fn create_organization(router: &Router, token: &str, name: &str) -> String {
    let response = request(
        router,
        "POST",
        "/api/v1/organizations",
        Some(token),
        Some(json!({
            "name": name,
            "description": "This is an example organization description.",
            "email": "example@example.com",
            "industry": "Technology",
            "type": "Non-profit",
            "country": "United States",
            "address": "123 Example St",
            "state": "California"
        })),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED, "org create failed: {}", response.body);
    response.body["data"]["org_id"].as_str().expect("org id").to_string()
}
