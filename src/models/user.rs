//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Database entity representing a registered user
//! - Request bodies for registration, login and profile updates
//! - `AuthResponse`: Body returned after register/login

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::validation;

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. `username`, `email` and `phone_number` are each
/// unique; the contact fields stay NULL until linked.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    /// Login name chosen at registration
    pub username: String,

    /// Display name
    pub name: String,

    /// Argon2 PHC string, never the plain password
    pub password_hash: String,

    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /v1/user/register`.
///
/// # JSON Example
///
/// ```json
/// {
///   "username": "janedoe",
///   "name": "Jane Doe",
///   "password": "hunter22"
/// }
/// ```
///
/// # Validation
///
/// - `username`: 5 to 15 characters
/// - `name`: 5 to 50 characters
/// - `password`: 5 to 15 characters
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::length("username", &self.username, 5, 15)?;
        validation::length("name", &self.name, 5, 50)?;
        validation::length("password", &self.password, 5, 15)
    }
}

/// Request body for `POST /v1/user/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::length("username", &self.username, 5, 15)?;
        validation::length("password", &self.password, 5, 15)
    }
}

/// Returned by both register and login.
///
/// ```json
/// {
///   "username": "janedoe",
///   "name": "Jane Doe",
///   "accessToken": "eyJhbGciOi..."
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub username: String,
    pub name: String,
    pub access_token: String,
}

/// Request body for `POST /v1/user/link/email`.
#[derive(Debug, Deserialize)]
pub struct LinkEmailRequest {
    pub email: String,
}

impl LinkEmailRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::email("email", &self.email)
    }
}

/// Request body for `POST /v1/user/link/phone`.
#[derive(Debug, Deserialize)]
pub struct LinkPhoneRequest {
    pub phone: String,
}

impl LinkPhoneRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::phone("phone", &self.phone)
    }
}

/// Request body for `PATCH /v1/user`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub image_url: String,
    pub name: String,
}

impl UpdateAccountRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::url("imageUrl", &self.image_url)?;
        validation::length("name", &self.name, 5, 50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_short_fields() {
        let request = RegisterRequest {
            username: "jane".into(),
            name: "Jane Doe".into(),
            password: "hunter22".into(),
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            username: "janedoe".into(),
            name: "Jane Doe".into(),
            password: "hunter22".into(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn login_rejects_long_password() {
        let request = LoginRequest {
            username: "janedoe".into(),
            password: "a-very-long-password".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn auth_response_uses_camel_case() {
        let response = AuthResponse {
            username: "janedoe".into(),
            name: "Jane Doe".into(),
            access_token: "token".into(),
        };
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["accessToken"], "token");
    }

    #[test]
    fn update_account_checks_url_and_name() {
        let request: UpdateAccountRequest = serde_json::from_str(
            r#"{"imageUrl": "https://cdn.example.com/me.jpg", "name": "Jane Doe"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());

        let request: UpdateAccountRequest =
            serde_json::from_str(r#"{"imageUrl": "nope", "name": "Jane Doe"}"#).unwrap();
        assert!(request.validate().is_err());
    }
}
