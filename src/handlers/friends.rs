//! Friend HTTP handlers.

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::AppError,
    extract::AppJson,
    middleware::auth::AuthContext,
    models::{
        friend::{FriendFilter, FriendRequest, FriendResponse},
        response::PageResponse,
    },
    services::friend_service,
};

/// `POST /v1/friend` with `{"userId": "..."}`
pub async fn add_friend(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<FriendRequest>,
) -> Result<StatusCode, AppError> {
    friend_service::add(&state.pool, auth.user_id, request).await?;
    Ok(StatusCode::OK)
}

/// `DELETE /v1/friend` with `{"userId": "..."}`
pub async fn remove_friend(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<FriendRequest>,
) -> Result<StatusCode, AppError> {
    friend_service::remove(&state.pool, auth.user_id, request).await?;
    Ok(StatusCode::OK)
}

/// `GET /v1/friend?limit=&offset=&sortBy=&orderBy=&onlyFriend=&search=`
pub async fn list_friends(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PageResponse<FriendResponse>>, AppError> {
    let filter = FriendFilter::from_query(&params);

    let page = friend_service::list(&state.pool, auth.user_id, filter).await?;
    Ok(Json(page))
}
