//! Friendship models.
//!
//! A friendship is stored as two directed rows in `friends` (`a -> b` and
//! `b -> a`) so lookups never need an `OR`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::product::{SortOrder, parse_bool};

/// Request body for `POST /v1/friend` and `DELETE /v1/friend`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
    pub user_id: String,
}

impl FriendRequest {
    /// Validate the body and return the friend's id.
    pub fn validate(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.user_id)
            .map_err(|_| AppError::InvalidRequest("userId must be a valid id".to_string()))
    }
}

/// A friend row as listed for the caller.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FriendListing {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub friend_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponse {
    pub user_id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub friend_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<FriendListing> for FriendResponse {
    fn from(row: FriendListing) -> Self {
        Self {
            user_id: row.id,
            name: row.name,
            image_url: row.image_url,
            friend_count: row.friend_count,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FriendSort {
    FriendCount,
    CreatedAt,
}

impl FriendSort {
    pub fn column(&self) -> &'static str {
        match self {
            FriendSort::FriendCount => "friend_count",
            FriendSort::CreatedAt => "created_at",
        }
    }
}

pub const DEFAULT_FRIEND_LIMIT: i64 = 5;

/// Parsed query string of `GET /v1/friend`.
#[derive(Debug, Clone, PartialEq)]
pub struct FriendFilter {
    pub limit: i64,
    pub offset: i64,
    pub sort: FriendSort,
    pub order: SortOrder,
    pub search: Option<String>,

    /// List every other user instead of only the caller's friends
    pub everyone: bool,
}

impl FriendFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        Self {
            limit: get("limit")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_FRIEND_LIMIT),
            offset: get("offset")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v >= 0)
                .unwrap_or(0),
            sort: match get("sortBy") {
                Some("friendCount") => FriendSort::FriendCount,
                _ => FriendSort::CreatedAt,
            },
            order: SortOrder::parse(get("orderBy")).unwrap_or(SortOrder::Desc),
            search: get("search").map(str::to_string),
            everyone: get("onlyFriend")
                .and_then(parse_bool)
                .map(|only_friend| !only_friend)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friend_request_requires_uuid() {
        let request = FriendRequest {
            user_id: "nobody".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn filter_defaults() {
        let filter = FriendFilter::from_query(&HashMap::new());
        assert_eq!(filter.limit, DEFAULT_FRIEND_LIMIT);
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.sort, FriendSort::CreatedAt);
        assert_eq!(filter.order, SortOrder::Desc);
        assert!(!filter.everyone);
    }

    #[test]
    fn filter_parses_sort_and_scope() {
        let params: HashMap<String, String> = [
            ("sortBy", "friendCount"),
            ("orderBy", "asc"),
            ("onlyFriend", "false"),
            ("limit", "20"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let filter = FriendFilter::from_query(&params);
        assert_eq!(filter.sort, FriendSort::FriendCount);
        assert_eq!(filter.order, SortOrder::Asc);
        assert!(filter.everyone);
        assert_eq!(filter.limit, 20);
    }
}
