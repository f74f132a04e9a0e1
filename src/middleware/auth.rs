use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Authenticated principal, extracted from the bearer token and passed to
/// handlers explicitly as a request extension.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Bearer-token middleware guarding the `/api/v1` surface (auth routes
/// excepted). Decodes the JWT and injects an [`AuthUser`] extension.
pub async fn bearer_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;
    let claims = auth::decode_token(&token)
        .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let value = header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err("Empty bearer token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", value.parse().unwrap());
        headers
    }

    #[test]
    fn accepts_bearer_scheme_only() {
        assert_eq!(
            extract_bearer_token(&headers_with("Bearer abc")).as_deref(),
            Ok("abc")
        );
        assert!(extract_bearer_token(&headers_with("Basic abc")).is_err());
        assert!(extract_bearer_token(&headers_with("Bearer  ")).is_err());
        assert!(extract_bearer_token(&HeaderMap::new()).is_err());
    }
}
