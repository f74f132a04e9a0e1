use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::config;

/// Bearer-token claims carried by every authenticated request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: String, role: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            email,
            role,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token generation error: {0}")]
    TokenGeneration(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    MissingSecret,
}

pub fn generate_token(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

pub fn decode_token(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    Ok(data.claims)
}

/// Salted SHA-256 digest, hex encoded. The salt comes from configuration so
/// hashes are not portable between deployments.
pub fn hash_password(password: &str) -> String {
    let salt = &config::config().security.password_salt;
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}
