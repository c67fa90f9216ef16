//! SQL for the `friends` table.

use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::friend::{FriendFilter, FriendListing},
    repositories::like_pattern,
};

/// Store both directions of a friendship in one statement.
///
/// An existing friendship surfaces as `AppError::Conflict`.
pub async fn insert_pair<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    friend_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO friends (a, b) VALUES ($1, $2), ($2, $1)")
        .bind(user_id)
        .bind(friend_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn exists<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    friend_id: Uuid,
) -> Result<bool, AppError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM friends WHERE a = $1 AND b = $2)")
            .bind(user_id)
            .bind(friend_id)
            .fetch_one(executor)
            .await?;

    Ok(exists)
}

pub async fn delete_pair<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    friend_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM friends WHERE (a = $1 AND b = $2) OR (a = $2 AND b = $1)")
        .bind(user_id)
        .bind(friend_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    filter: &FriendFilter,
) -> Result<Vec<FriendListing>, AppError> {
    let mut builder = list_query(user_id, filter);

    let rows = builder
        .build_query_as::<FriendListing>()
        .fetch_all(executor)
        .await?;

    Ok(rows)
}

pub async fn count<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    filter: &FriendFilter,
) -> Result<i64, AppError> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users u WHERE 1 = 1");
    push_conditions(&mut builder, user_id, filter);

    let total = builder
        .build_query_scalar::<i64>()
        .fetch_one(executor)
        .await?;

    Ok(total)
}

fn list_query(user_id: Uuid, filter: &FriendFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(
        r#"
        SELECT
            u.id, u.name, u.image_url, u.created_at,
            (SELECT COUNT(*) FROM friends f2 WHERE f2.a = u.id) AS friend_count
        FROM users u
        WHERE 1 = 1"#,
    );
    push_conditions(&mut builder, user_id, filter);

    builder
        .push(" ORDER BY ")
        .push(filter.sort.column())
        .push(" ")
        .push(filter.order.keyword())
        .push(", u.id ASC");
    builder.push(" LIMIT ").push_bind(filter.limit);
    builder.push(" OFFSET ").push_bind(filter.offset);
    builder
}

fn push_conditions(
    builder: &mut QueryBuilder<'static, Postgres>,
    user_id: Uuid,
    filter: &FriendFilter,
) {
    if filter.everyone {
        builder.push(" AND u.id <> ").push_bind(user_id);
    } else {
        builder
            .push(" AND EXISTS (SELECT 1 FROM friends f WHERE f.a = ")
            .push_bind(user_id)
            .push(" AND f.b = u.id)");
    }

    if let Some(search) = &filter.search {
        builder
            .push(" AND u.name ILIKE ")
            .push_bind(like_pattern(search))
            .push(" ESCAPE '\\'");
    }
}
