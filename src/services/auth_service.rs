//! Access tokens and password hashing.
//!
//! - Tokens are HS256 JWTs whose `sub` claim is the user id
//! - Passwords are stored as Argon2id PHC strings
//!
//! Hashing is CPU-bound, so it runs on tokio's blocking pool instead of an
//! async worker thread.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Clock skew tolerated when checking `exp`.
const TOKEN_LEEWAY_SECS: u64 = 30;

/// JWT claims carried by every access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue an access token for `user_id` valid for `ttl_minutes`.
pub fn issue_token(secret: &str, ttl_minutes: i64, user_id: Uuid) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = Duration::try_minutes(ttl_minutes)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::Internal(format!("token lifetime out of range: {}", ttl_minutes)))?;
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

/// Verify signature and expiry of `token` and return its subject.
///
/// # Errors
///
/// `AppError::InvalidToken` for any malformed, expired or forged token.
pub fn verify_token(secret: &str, token: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = TOKEN_LEEWAY_SECS;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "token rejected");
        AppError::InvalidToken
    })?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| AppError::InvalidToken)
}

/// Hash a password with a fresh random salt.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt_bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AppError::Internal(format!("failed to encode salt: {}", e)))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
    })
    .await
    .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
}

/// Check `password` against a stored PHC string.
pub async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&password_hash)
            .map_err(|e| AppError::Internal(format!("stored hash is invalid: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await
    .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
}
