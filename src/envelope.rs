//! Success-side response envelope builder.
//!
//! Every endpoint answers with the uniform wrapper
//! `{message, status_code, data}`; the error side lives in [`crate::error`].

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::{json, Value};

/// `{message, status_code, data}` with the given status.
pub fn success(status: StatusCode, message: &str, data: Value) -> Response {
    (
        status,
        Json(json!({
            "message": message,
            "status_code": status.as_u16(),
            "data": data,
        })),
    )
        .into_response()
}

/// 201 envelope for freshly created entities.
pub fn created(message: &str, data: Value) -> Response {
    success(StatusCode::CREATED, message, data)
}

/// 200 envelope with the extra `status: "success"` marker carried by
/// collection endpoints.
pub fn collection(message: &str, data: Value) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": message,
            "status_code": 200,
            "data": data,
        })),
    )
        .into_response()
}
