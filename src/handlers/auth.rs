use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::models::User;
use crate::validation::{validate, Kind, Rule};

const REGISTER_RULES: &[(&str, Rule)] = &[
    ("name", Rule::required(Kind::Text)),
    ("email", Rule::required(Kind::Email)),
    ("password", Rule::required(Kind::Text)),
    ("phone", Rule::sometimes(Kind::Text)),
];

const LOGIN_RULES: &[(&str, Rule)] = &[
    ("email", Rule::required(Kind::Email)),
    ("password", Rule::required(Kind::Text)),
];

fn text(fields: &crate::validation::ValidatedFields, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let validated = validate(&payload, REGISTER_RULES).map_err(ApiError::validation_failed)?;

    let user = User::new(
        text(&validated, "name"),
        text(&validated, "email"),
        auth::hash_password(&text(&validated, "password")),
        validated.get("phone").and_then(Value::as_str).map(str::to_string),
    );
    let user = state.store.create_user(user).await?;

    let claims = Claims::new(user.user_id, user.email.clone(), user.role.clone());
    let access_token = auth::generate_token(&claims)?;

    // The token rides both at the top level and inside data; clients read
    // either location.
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status_code": 201,
            "message": "Registration successful",
            "access_token": access_token,
            "data": {
                "access_token": access_token,
                "user": {
                    "id": user.user_id,
                    "name": user.name,
                    "email": user.email,
                    "role": user.role,
                },
            },
        })),
    )
        .into_response())
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Response, ApiError> {
    let validated = validate(&payload, LOGIN_RULES).map_err(ApiError::validation_failed)?;

    let email = text(&validated, "email");
    let password = text(&validated, "password");

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .filter(|u| auth::verify_password(&password, &u.password_hash))
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let claims = Claims::new(user.user_id, user.email.clone(), user.role.clone());
    let access_token = auth::generate_token(&claims)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status_code": 200,
            "message": "Login successful",
            "access_token": access_token,
            "data": {
                "access_token": access_token,
                "user": {
                    "id": user.user_id,
                    "email": user.email,
                    "role": user.role,
                },
            },
        })),
    )
        .into_response())
}
