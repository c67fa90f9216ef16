//! SQL for the `products` table, including the dynamic search query.

use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::product::{
        CreateProductRequest, Product, ProductFilter, ProductListing, UpdateProductRequest,
    },
    repositories::like_pattern,
};

const PRODUCT_COLUMNS: &str =
    "id, user_id, name, price, image_url, stock, condition, is_purchasable, created_at";

/// Product columns plus tags and purchase statistics, aliased as `p`.
const LISTING_SELECT: &str = r#"
    SELECT
        p.id, p.user_id, p.name, p.price, p.image_url, p.stock, p.condition,
        p.is_purchasable, p.created_at,
        COALESCE(
            (SELECT array_agg(t.tag ORDER BY t.tag) FROM tags t WHERE t.product_id = p.id),
            ARRAY[]::TEXT[]
        ) AS tags,
        (SELECT COUNT(*) FROM payments pay WHERE pay.product_id = p.id) AS purchase_count,
        COALESCE(
            (SELECT SUM(pay.quantity) FROM payments pay WHERE pay.product_id = p.id),
            0
        )::BIGINT AS sold_total
    FROM products p
    WHERE 1 = 1"#;

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    request: &CreateProductRequest,
) -> Result<Product, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        r#"
        INSERT INTO products (user_id, name, price, image_url, stock, condition, is_purchasable)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        PRODUCT_COLUMNS
    ))
    .bind(user_id)
    .bind(&request.name)
    .bind(request.price)
    .bind(&request.image_url)
    .bind(request.stock)
    .bind(request.condition.as_str())
    .bind(request.is_purchasable)
    .fetch_one(executor)
    .await?;

    Ok(product)
}

/// Owner of a product, `None` when the product does not exist.
pub async fn find_owner<'e>(
    executor: impl PgExecutor<'e>,
    product_id: Uuid,
) -> Result<Option<Uuid>, AppError> {
    let owner = sqlx::query_scalar("SELECT user_id FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(executor)
        .await?;

    Ok(owner)
}

/// Fetch and row-lock a product until the surrounding transaction ends.
pub async fn find_for_update<'e>(
    executor: impl PgExecutor<'e>,
    product_id: Uuid,
) -> Result<Option<Product>, AppError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {} FROM products WHERE id = $1 FOR UPDATE",
        PRODUCT_COLUMNS
    ))
    .bind(product_id)
    .fetch_optional(executor)
    .await?;

    Ok(product)
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    product_id: Uuid,
    request: &UpdateProductRequest,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE products
        SET name = $1, price = $2, image_url = $3, condition = $4, is_purchasable = $5
        WHERE id = $6
        "#,
    )
    .bind(&request.name)
    .bind(request.price)
    .bind(&request.image_url)
    .bind(request.condition.as_str())
    .bind(request.is_purchasable)
    .bind(product_id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn set_stock<'e>(
    executor: impl PgExecutor<'e>,
    product_id: Uuid,
    stock: i64,
) -> Result<(), AppError> {
    sqlx::query("UPDATE products SET stock = $1 WHERE id = $2")
        .bind(stock)
        .bind(product_id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Tags and payments go with it (ON DELETE CASCADE).
pub async fn delete<'e>(executor: impl PgExecutor<'e>, product_id: Uuid) -> Result<(), AppError> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn find_listing<'e>(
    executor: impl PgExecutor<'e>,
    product_id: Uuid,
) -> Result<Option<ProductListing>, AppError> {
    let mut builder = QueryBuilder::<Postgres>::new(LISTING_SELECT);
    builder.push(" AND p.id = ").push_bind(product_id);

    let listing = builder
        .build_query_as::<ProductListing>()
        .fetch_optional(executor)
        .await?;

    Ok(listing)
}

/// One page of products matching `filter`.
pub async fn search<'e>(
    executor: impl PgExecutor<'e>,
    filter: &ProductFilter,
) -> Result<Vec<ProductListing>, AppError> {
    let mut builder = search_query(filter);

    let listings = builder
        .build_query_as::<ProductListing>()
        .fetch_all(executor)
        .await?;

    Ok(listings)
}

/// Number of products matching `filter`, ignoring pagination.
pub async fn count<'e>(
    executor: impl PgExecutor<'e>,
    filter: &ProductFilter,
) -> Result<i64, AppError> {
    let mut builder = count_query(filter);

    let total = builder
        .build_query_scalar::<i64>()
        .fetch_one(executor)
        .await?;

    Ok(total)
}

fn search_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(LISTING_SELECT);
    push_conditions(&mut builder, filter);

    builder.push(" ORDER BY ");
    match filter.sort {
        Some((column, order)) => {
            builder.push(column.column()).push(" ").push(order.keyword());
        }
        None => {
            builder.push("p.created_at DESC");
        }
    }
    // Tie-breaker keeps pages stable
    builder.push(", p.id ASC");

    builder.push(" LIMIT ").push_bind(filter.limit);
    builder.push(" OFFSET ").push_bind(filter.offset);
    builder
}

fn count_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p WHERE 1 = 1");
    push_conditions(&mut builder, filter);
    builder
}

/// Append the WHERE clauses of a search. Every user-supplied value is bound.
fn push_conditions(builder: &mut QueryBuilder<'static, Postgres>, filter: &ProductFilter) {
    if let Some(search) = &filter.search {
        builder
            .push(" AND p.name LIKE ")
            .push_bind(like_pattern(search))
            .push(" ESCAPE '\\'");
    }

    if !filter.tags.is_empty() {
        builder
            .push(" AND EXISTS (SELECT 1 FROM tags t WHERE t.product_id = p.id AND t.tag = ANY(")
            .push_bind(filter.tags.clone())
            .push("))");
    }

    if filter.user_only {
        if let Some(owner_id) = filter.owner_id {
            builder.push(" AND p.user_id = ").push_bind(owner_id);
        }
    }

    if let Some(condition) = filter.condition {
        builder.push(" AND p.condition = ").push_bind(condition.as_str());
    }

    if !filter.show_empty_stock {
        builder.push(" AND p.stock > 0");
    }

    if let Some(max_price) = filter.max_price {
        builder.push(" AND p.price <= ").push_bind(max_price);
    }

    if let Some(min_price) = filter.min_price {
        builder.push(" AND p.price >= ").push_bind(min_price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{Condition, ProductSort, SortOrder};

    #[test]
    fn default_search_only_hides_empty_stock() {
        let builder = search_query(&ProductFilter::default());
        let sql = builder.sql();

        assert!(sql.contains("AND p.stock > 0"));
        assert!(sql.contains("ORDER BY p.created_at DESC, p.id ASC"));
        assert!(sql.trim_end().ends_with("LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn user_input_is_never_inlined() {
        let filter = ProductFilter {
            search: Some("'; DROP TABLE products; --".into()),
            tags: vec!["x' OR '1'='1".into()],
            condition: Some(Condition::Second),
            max_price: Some(500),
            min_price: Some(100),
            ..ProductFilter::default()
        };
        let builder = search_query(&filter);
        let sql = builder.sql();

        assert!(!sql.contains("DROP TABLE"));
        assert!(!sql.contains("OR '1'='1"));
        assert!(sql.contains("p.name LIKE $1 ESCAPE '\\'"));
        assert!(sql.contains("t.tag = ANY($2)"));
        assert!(sql.contains("p.condition = $3"));
        assert!(sql.contains("p.price <= $4"));
        assert!(sql.contains("p.price >= $5"));
        assert!(sql.contains("LIMIT $6 OFFSET $7"));
    }

    #[test]
    fn show_empty_stock_drops_stock_condition() {
        let filter = ProductFilter {
            show_empty_stock: true,
            ..ProductFilter::default()
        };
        assert!(!search_query(&filter).sql().contains("p.stock > 0"));
    }

    #[test]
    fn owner_filter_requires_user_only() {
        let owner_id = Uuid::new_v4();
        let filter = ProductFilter {
            owner_id: Some(owner_id),
            ..ProductFilter::default()
        };
        assert!(!count_query(&filter).sql().contains("p.user_id"));

        let filter = ProductFilter {
            user_only: true,
            ..filter
        };
        assert!(count_query(&filter).sql().contains("p.user_id = $1"));
    }

    #[test]
    fn sort_uses_whitelisted_columns() {
        let filter = ProductFilter {
            sort: Some((ProductSort::Price, SortOrder::Asc)),
            ..ProductFilter::default()
        };
        assert!(search_query(&filter).sql().contains("ORDER BY p.price ASC, p.id ASC"));
    }

    #[test]
    fn count_has_no_pagination() {
        let sql = count_query(&ProductFilter::default()).sql().to_string();
        assert!(sql.starts_with("SELECT COUNT(*) FROM products p"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("ORDER BY"));
    }
}
