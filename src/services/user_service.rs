//! User service - registration, login and profile updates.

use uuid::Uuid;

use crate::{
    config::Config,
    db::DbPool,
    error::AppError,
    models::user::{
        AuthResponse, LinkEmailRequest, LinkPhoneRequest, LoginRequest, RegisterRequest,
        UpdateAccountRequest,
    },
    repositories::user_repo,
    services::auth_service,
};

/// Register a new user and issue their first access token.
///
/// # Errors
///
/// - `InvalidRequest`: a field is out of range
/// - `Conflict`: the username is taken
pub async fn register(
    pool: &DbPool,
    config: &Config,
    request: RegisterRequest,
) -> Result<AuthResponse, AppError> {
    request.validate()?;

    let password_hash = auth_service::hash_password(request.password).await?;

    let user = user_repo::insert(pool, &request.username, &request.name, &password_hash)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict("username already taken".to_string()),
            other => other,
        })?;

    let access_token = auth_service::issue_token(&config.jwt_secret, config.jwt_ttl_minutes, user.id)?;

    tracing::info!(user_id = %user.id, username = %user.username, "user_registered");

    Ok(AuthResponse {
        username: user.username,
        name: user.name,
        access_token,
    })
}

/// Check credentials and issue an access token.
///
/// # Errors
///
/// - `NotFound`: no user has this username
/// - `InvalidRequest`: the password does not match
pub async fn login(
    pool: &DbPool,
    config: &Config,
    request: LoginRequest,
) -> Result<AuthResponse, AppError> {
    request.validate()?;

    let user = user_repo::find_by_username(pool, &request.username)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let valid =
        auth_service::verify_password(request.password, user.password_hash.clone()).await?;
    if !valid {
        tracing::warn!(user_id = %user.id, "login_rejected");
        return Err(AppError::InvalidRequest("wrong password".to_string()));
    }

    let access_token = auth_service::issue_token(&config.jwt_secret, config.jwt_ttl_minutes, user.id)?;

    tracing::info!(user_id = %user.id, "user_logged_in");

    Ok(AuthResponse {
        username: user.username,
        name: user.name,
        access_token,
    })
}

pub async fn link_email(
    pool: &DbPool,
    user_id: Uuid,
    request: LinkEmailRequest,
) -> Result<(), AppError> {
    request.validate()?;

    let updated = user_repo::set_email(pool, user_id, &request.email)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict("email already in use".to_string()),
            other => other,
        })?;
    ensure_updated(updated)?;

    tracing::info!(user_id = %user_id, "email_linked");
    Ok(())
}

pub async fn link_phone(
    pool: &DbPool,
    user_id: Uuid,
    request: LinkPhoneRequest,
) -> Result<(), AppError> {
    request.validate()?;

    let updated = user_repo::set_phone(pool, user_id, &request.phone)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict("phone already in use".to_string()),
            other => other,
        })?;
    ensure_updated(updated)?;

    tracing::info!(user_id = %user_id, "phone_linked");
    Ok(())
}

/// Replace the caller's display name and avatar.
pub async fn update_account(
    pool: &DbPool,
    user_id: Uuid,
    request: UpdateAccountRequest,
) -> Result<(), AppError> {
    request.validate()?;

    let updated = user_repo::update_profile(pool, user_id, &request.name, &request.image_url).await?;
    ensure_updated(updated)
}

// A valid token for a deleted user
fn ensure_updated(rows_affected: u64) -> Result<(), AppError> {
    if rows_affected == 0 {
        return Err(AppError::NotFound("User"));
    }
    Ok(())
}
