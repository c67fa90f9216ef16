//! SQL for the `tags` table.

use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::AppError;

/// Attach `tags` to a product in a single multi-row insert.
///
/// Duplicate tags are ignored. Does nothing for an empty slice.
pub async fn insert_many<'e>(
    executor: impl PgExecutor<'e>,
    product_id: Uuid,
    tags: &[String],
) -> Result<(), AppError> {
    if tags.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO tags (product_id, tag) ");
    builder.push_values(tags, |mut row, tag| {
        row.push_bind(product_id).push_bind(tag.clone());
    });
    builder.push(" ON CONFLICT DO NOTHING");

    builder.build().execute(executor).await?;
    Ok(())
}

pub async fn delete_for_product<'e>(
    executor: impl PgExecutor<'e>,
    product_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM tags WHERE product_id = $1")
        .bind(product_id)
        .execute(executor)
        .await?;

    Ok(())
}
