//! Friend service - symmetric friendships between users.

use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        friend::{FriendFilter, FriendRequest, FriendResponse},
        response::{Meta, PageResponse},
    },
    repositories::{friend_repo, user_repo},
};

/// Befriend another user.
///
/// # Errors
///
/// - `InvalidRequest`: the target is the caller, or they are already friends
/// - `NotFound`: the target user does not exist
pub async fn add(pool: &DbPool, user_id: Uuid, request: FriendRequest) -> Result<(), AppError> {
    let friend_id = check_target(pool, user_id, &request).await?;

    friend_repo::insert_pair(pool, user_id, friend_id)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::InvalidRequest("already friends".to_string()),
            other => other,
        })?;

    tracing::info!(user_id = %user_id, friend_id = %friend_id, "friend_added");
    Ok(())
}

pub async fn remove(pool: &DbPool, user_id: Uuid, request: FriendRequest) -> Result<(), AppError> {
    let friend_id = check_target(pool, user_id, &request).await?;

    if !friend_repo::exists(pool, user_id, friend_id).await? {
        return Err(AppError::InvalidRequest("not friends".to_string()));
    }
    friend_repo::delete_pair(pool, user_id, friend_id).await?;

    tracing::info!(user_id = %user_id, friend_id = %friend_id, "friend_removed");
    Ok(())
}

pub async fn list(
    pool: &DbPool,
    user_id: Uuid,
    filter: FriendFilter,
) -> Result<PageResponse<FriendResponse>, AppError> {
    let rows = friend_repo::list(pool, user_id, &filter).await?;
    let total = friend_repo::count(pool, user_id, &filter).await?;

    Ok(PageResponse::ok(
        rows.into_iter().map(Into::into).collect(),
        Meta {
            limit: filter.limit,
            offset: filter.offset,
            total,
        },
    ))
}

/// Parse the target id, rejecting the caller and unknown users.
async fn check_target(
    pool: &DbPool,
    user_id: Uuid,
    request: &FriendRequest,
) -> Result<Uuid, AppError> {
    let friend_id = request.validate()?;

    if friend_id == user_id {
        return Err(AppError::InvalidRequest(
            "cannot befriend yourself".to_string(),
        ));
    }
    if !user_repo::exists(pool, friend_id).await? {
        return Err(AppError::NotFound("User"));
    }
    Ok(friend_id)
}
