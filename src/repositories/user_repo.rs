//! SQL for the `users` table.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{error::AppError, models::user::User};

const USER_COLUMNS: &str =
    "id, username, name, password_hash, email, phone_number, image_url, created_at";

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
    name: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, name, password_hash) VALUES ($1, $2, $3) RETURNING {}",
        USER_COLUMNS
    ))
    .bind(username)
    .bind(name)
    .bind(password_hash)
    .fetch_one(executor)
    .await?;

    Ok(user)
}

pub async fn find_by_username<'e>(
    executor: impl PgExecutor<'e>,
    username: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE username = $1",
        USER_COLUMNS
    ))
    .bind(username)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn find_by_id<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE id = $1",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn exists<'e>(executor: impl PgExecutor<'e>, user_id: Uuid) -> Result<bool, AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(executor)
        .await?;

    Ok(exists)
}

/// Returns the number of rows updated (0 when the user is gone).
pub async fn set_email<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    email: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE users SET email = $1 WHERE id = $2")
        .bind(email)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn set_phone<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    phone: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE users SET phone_number = $1 WHERE id = $2")
        .bind(phone)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

pub async fn update_profile<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    name: &str,
    image_url: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE users SET name = $1, image_url = $2 WHERE id = $3")
        .bind(name)
        .bind(image_url)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
