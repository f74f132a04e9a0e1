mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{register, request, test_app};

#[tokio::test]
async fn index_and_health_are_public() {
    let app = test_app();

    let index = request(&app.router, "GET", "/", None, None).await;
    assert_eq!(index.status, StatusCode::OK);
    assert_eq!(index.body["success"], true);
    assert_eq!(index.body["data"]["name"], "Orgnest API");

    let health = request(&app.router, "GET", "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
}

#[tokio::test]
async fn creating_an_organization_enrolls_the_creator() {
    let app = test_app();
    let (token, user_id) = register(&app.router, "Owner One", "owner@example.com").await;

    let response = request(
        &app.router,
        "POST",
        "/api/v1/organizations",
        Some(&token),
        Some(json!({
            "name": "Example Organization",
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

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.body["message"], "Organization created successfully");
    let org_id = response.body["data"]["org_id"].as_str().unwrap().to_string();
    assert_eq!(response.body["data"]["name"], "Example Organization");
    assert_eq!(response.body["data"]["type"], "Non-profit");

    let listing = request(
        &app.router,
        "GET",
        &format!("/api/v1/organizations/{}/users", org_id),
        Some(&token),
        None,
    )
    .await;
    let members = listing.body["data"]["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["userId"], user_id.as_str());
}

#[tokio::test]
async fn organization_name_must_be_unique() {
    let app = test_app();
    let (token, _) = register(&app.router, "Owner One", "owner@example.com").await;
    let payload = json!({ "name": "Example Organization" });

    let first = request(
        &app.router,
        "POST",
        "/api/v1/organizations",
        Some(&token),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(first.status, StatusCode::CREATED, "{}", first.body);

    let second = request(
        &app.router,
        "POST",
        "/api/v1/organizations",
        Some(&token),
        Some(payload),
    )
    .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["message"], "Organization name already taken");
}

#[tokio::test]
async fn organization_creation_requires_a_name() {
    let app = test_app();
    let (token, _) = register(&app.router, "Owner One", "owner@example.com").await;

    let response = request(
        &app.router,
        "POST",
        "/api/v1/organizations",
        Some(&token),
        Some(json!({ "description": "nameless" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let messages = response.body["message"].as_array().unwrap();
    assert!(messages.contains(&json!("The name field is required.")));
}
