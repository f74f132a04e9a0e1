// HTTP API error types, rendered in the uniform response envelope.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::storage::StorageError;
use crate::store::StoreError;

/// Handler-level error with the status code and envelope body it renders to.
///
/// Envelope shape for errors: `{status_code, message, error}` where `message`
/// is either a single string or the full list of validator messages.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (malformed identifier or input shape)
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found (entity-specific message)
    NotFound(String),

    // 422 Unprocessable Entity (one or more field-level messages)
    ValidationFailed(Vec<String>),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::ValidationFailed(_) => 422,
            ApiError::Internal(_) => 500,
        }
    }

    fn error_label(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "Bad Request",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::NotFound(_) => "Not Found",
            ApiError::ValidationFailed(_) => "Validation fails",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }

    /// Envelope body for this error.
    pub fn to_json(&self) -> Value {
        let message: Value = match self {
            ApiError::ValidationFailed(errors) => json!(errors),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => json!(msg),
        };

        json!({
            "status_code": self.status_code(),
            "message": message,
            "error": self.error_label(),
        })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn validation_failed(errors: Vec<String>) -> Self {
        ApiError::ValidationFailed(errors)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => ApiError::bad_request(msg),
            StoreError::Query(msg) => {
                // Don't expose internal storage errors to clients
                tracing::error!("storage query error: {}", msg);
                ApiError::internal("An error occurred while processing your request")
            }
            StoreError::Decode(msg) => {
                tracing::error!("storage decode error: {}", msg);
                ApiError::internal("An error occurred while processing your request")
            }
            StoreError::Sqlx(e) => {
                tracing::error!("sqlx error: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("content store error: {}", err);
        ApiError::internal("An error occurred while writing the export file")
    }
}

impl From<crate::export::ExportError> for ApiError {
    fn from(err: crate::export::ExportError) -> Self {
        tracing::error!("export error: {}", err);
        ApiError::internal("An error occurred while generating the export")
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        match err {
            crate::auth::AuthError::InvalidToken(msg) => ApiError::unauthorized(msg),
            other => {
                tracing::error!("auth error: {}", other);
                ApiError::internal("An error occurred while issuing credentials")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::ValidationFailed(errors) => write!(f, "{}", errors.join("; ")),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_envelope_shape() {
        let body = ApiError::not_found("Product not found").to_json();
        assert_eq!(body["status_code"], 404);
        assert_eq!(body["message"], "Product not found");
        assert_eq!(body["error"], "Not Found");
    }

    #[test]
    fn validation_envelope_carries_message_list() {
        let body = ApiError::validation_failed(vec![
            "The name field is required.".to_string(),
            "The price must be a number.".to_string(),
        ])
        .to_json();

        assert_eq!(body["status_code"], 422);
        assert_eq!(body["error"], "Validation fails");
        assert_eq!(body["message"].as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn conflict_maps_to_bad_request() {
        let err: ApiError = StoreError::Conflict("Email already taken".into()).into();
        assert_eq!(err.status_code(), 400);
    }
}
