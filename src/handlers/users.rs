//! User HTTP handlers.
//!
//! This module implements the user-related API endpoints:
//! - POST /v1/user/register - Create an account and receive a token
//! - POST /v1/user/login - Exchange credentials for a token
//! - POST /v1/user/link/email - Attach an email address
//! - POST /v1/user/link/phone - Attach a phone number
//! - PATCH /v1/user - Update name and avatar

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::AppError,
    extract::AppJson,
    middleware::auth::AuthContext,
    models::{
        response::ApiResponse,
        user::{
            AuthResponse, LinkEmailRequest, LinkPhoneRequest, LoginRequest, RegisterRequest,
            UpdateAccountRequest,
        },
    },
    services::user_service,
};

/// Register a new user.
///
/// # Endpoint
///
/// `POST /v1/user/register`
///
/// # Request Body
///
/// ```json
/// {
///   "username": "janedoe",
///   "name": "Jane Doe",
///   "password": "hunter22"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: username, name and access token
/// - **Error (400)**: a field is out of range
/// - **Error (409)**: username already taken
///
/// ```json
/// {
///   "message": "User registered successfully",
///   "data": { "username": "janedoe", "name": "Jane Doe", "accessToken": "eyJ..." }
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let response = user_service::register(&state.pool, &state.config, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("User registered successfully", response)),
    ))
}

/// Log in with username and password.
///
/// # Response
///
/// - **Success (200 OK)**: same body shape as registration
/// - **Error (404)**: unknown username
/// - **Error (400)**: wrong password
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let response = user_service::login(&state.pool, &state.config, request).await?;

    Ok(Json(ApiResponse::new("User logged successfully", response)))
}

/// `POST /v1/user/link/email`
pub async fn link_email(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<LinkEmailRequest>,
) -> Result<StatusCode, AppError> {
    user_service::link_email(&state.pool, auth.user_id, request).await?;
    Ok(StatusCode::OK)
}

/// `POST /v1/user/link/phone`
pub async fn link_phone(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<LinkPhoneRequest>,
) -> Result<StatusCode, AppError> {
    user_service::link_phone(&state.pool, auth.user_id, request).await?;
    Ok(StatusCode::OK)
}

/// `PATCH /v1/user`
pub async fn update_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<UpdateAccountRequest>,
) -> Result<StatusCode, AppError> {
    user_service::update_account(&state.pool, auth.user_id, request).await?;
    Ok(StatusCode::OK)
}
