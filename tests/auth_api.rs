mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{request, test_app};

#[tokio::test]
async fn register_issues_a_usable_token() {
    let app = test_app();

    let response = request(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Jane Smith",
            "email": "jane@example.com",
            "password": "password",
        })),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.body["message"], "Registration successful");
    assert_eq!(response.body["status_code"], 201);

    // the token rides at the top level and inside data
    let top = response.body["access_token"].as_str().unwrap();
    assert_eq!(response.body["data"]["access_token"].as_str(), Some(top));
    assert_eq!(response.body["data"]["user"]["email"], "jane@example.com");
    assert_eq!(response.body["data"]["user"]["role"], "user");

    // the issued token is accepted by protected routes
    let probe = request(
        &app.router,
        "GET",
        "/api/v1/members/not-a-uuid/search?search=x",
        Some(top),
        None,
    )
    .await;
    assert_ne!(probe.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_verifies_the_password() {
    let app = test_app();
    let payload = json!({
        "name": "Jane Smith",
        "email": "jane@example.com",
        "password": "password",
    });
    request(&app.router, "POST", "/api/v1/auth/register", None, Some(payload)).await;

    let ok = request(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "jane@example.com", "password": "password" })),
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK, "{}", ok.body);
    assert_eq!(ok.body["message"], "Login successful");
    assert!(ok.body["access_token"].as_str().is_some());

    let wrong = request(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "jane@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], "Invalid credentials");

    let unknown = request(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "password" })),
    )
    .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = test_app();
    let payload = json!({
        "name": "Jane Smith",
        "email": "jane@example.com",
        "password": "password",
    });

    let first = request(&app.router, "POST", "/api/v1/auth/register", None, Some(payload.clone())).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = request(&app.router, "POST", "/api/v1/auth/register", None, Some(payload)).await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["message"], "Email already taken");
}

#[tokio::test]
async fn register_validates_the_payload() {
    let app = test_app();

    let response = request(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "email": "not-an-email" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "Validation fails");
    let messages = response.body["message"].as_array().unwrap();
    assert!(messages.contains(&json!("The name field is required.")));
    assert!(messages.contains(&json!("The email must be a valid email address.")));
    assert!(messages.contains(&json!("The password field is required.")));
}

#[tokio::test]
async fn malformed_bearer_tokens_are_rejected() {
    let app = test_app();

    let garbage = request(
        &app.router,
        "POST",
        "/api/v1/products",
        Some("definitely-not-a-jwt"),
        Some(json!({ "name": "okoz" })),
    )
    .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["error"], "Unauthorized");
}
