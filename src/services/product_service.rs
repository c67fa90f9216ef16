//! Product service - listings, stock and purchases.
//!
//! Only the seller who created a product may change it. Writes touching more
//! than one table (product plus tags, stock plus payment) run inside a single
//! database transaction.
//!
//! # Purchase Guarantees
//!
//! `buy` locks the product row with `SELECT ... FOR UPDATE` before checking
//! stock, so concurrent purchases of the same product serialize and stock
//! never goes negative.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        payment::NewPayment,
        product::{
            BuyRequest, ChangeStockRequest, CreateProductRequest, ProductDetailResponse,
            ProductFilter, ProductResponse, SellerResponse, UpdateProductRequest,
        },
        response::{Meta, PageResponse},
    },
    repositories::{bank_account_repo, payment_repo, product_repo, tag_repo, user_repo},
};

/// Create a product owned by `user_id` together with its tags.
pub async fn create(
    pool: &DbPool,
    user_id: Uuid,
    request: CreateProductRequest,
) -> Result<(), AppError> {
    request.validate()?;
    let tags = unique_tags(&request.tags);

    let mut tx = pool.begin().await?;
    let product = product_repo::insert(&mut *tx, user_id, &request).await?;
    tag_repo::insert_many(&mut *tx, product.id, &tags).await?;
    tx.commit().await?;

    tracing::info!(product_id = %product.id, user_id = %user_id, "product_created");
    Ok(())
}

/// Replace a product's fields and tag set.
///
/// # Errors
///
/// - `NotFound`: the product does not exist
/// - `Forbidden`: the caller is not the seller
pub async fn update(
    pool: &DbPool,
    user_id: Uuid,
    product_id: Uuid,
    request: UpdateProductRequest,
) -> Result<(), AppError> {
    request.validate()?;
    let tags = unique_tags(&request.tags);

    let mut tx = pool.begin().await?;
    ensure_owner(&mut *tx, product_id, user_id).await?;
    product_repo::update(&mut *tx, product_id, &request).await?;
    tag_repo::delete_for_product(&mut *tx, product_id).await?;
    tag_repo::insert_many(&mut *tx, product_id, &tags).await?;
    tx.commit().await?;

    tracing::info!(product_id = %product_id, "product_updated");
    Ok(())
}

pub async fn delete(pool: &DbPool, user_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
    ensure_owner(pool, product_id, user_id).await?;
    product_repo::delete(pool, product_id).await?;

    tracing::info!(product_id = %product_id, "product_deleted");
    Ok(())
}

pub async fn change_stock(
    pool: &DbPool,
    user_id: Uuid,
    product_id: Uuid,
    request: ChangeStockRequest,
) -> Result<(), AppError> {
    request.validate()?;

    ensure_owner(pool, product_id, user_id).await?;
    product_repo::set_stock(pool, product_id, request.stock).await?;

    tracing::info!(product_id = %product_id, stock = request.stock, "stock_changed");
    Ok(())
}

/// A product with its seller's name, sales total and bank accounts.
pub async fn get_detail(pool: &DbPool, product_id: Uuid) -> Result<ProductDetailResponse, AppError> {
    let listing = product_repo::find_listing(pool, product_id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    let seller = user_repo::find_by_id(pool, listing.user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    let bank_accounts = bank_account_repo::list_for_user(pool, seller.id).await?;

    Ok(ProductDetailResponse {
        seller: SellerResponse {
            name: seller.name,
            product_sold_total: listing.sold_total,
            bank_accounts: bank_accounts.into_iter().map(Into::into).collect(),
        },
        product: listing.into(),
    })
}

/// One page of products plus the total number of matches.
///
/// # Errors
///
/// `Forbidden` when `user_only` is requested without an authenticated owner.
pub async fn search(
    pool: &DbPool,
    filter: ProductFilter,
) -> Result<PageResponse<ProductResponse>, AppError> {
    if filter.user_only && filter.owner_id.is_none() {
        return Err(AppError::Forbidden);
    }

    let listings = product_repo::search(pool, &filter).await?;
    let total = product_repo::count(pool, &filter).await?;

    Ok(PageResponse::ok(
        listings.into_iter().map(Into::into).collect(),
        Meta {
            limit: filter.limit,
            offset: filter.offset,
            total,
        },
    ))
}

/// Record a purchase of `quantity` units and decrement stock.
///
/// # Process
///
/// 1. Start database transaction
/// 2. Lock the product row
/// 3. Check it is purchasable and has enough stock
/// 4. Check the bank account belongs to the seller
/// 5. Decrement stock and insert the payment
/// 6. Commit (or roll back on any error)
///
/// # Errors
///
/// - `NotFound`: product or bank account does not exist
/// - `InvalidRequest`: not purchasable, foreign bank account, or not enough stock
pub async fn buy(
    pool: &DbPool,
    buyer_id: Uuid,
    product_id: Uuid,
    request: BuyRequest,
) -> Result<(), AppError> {
    let bank_account_id = request.validate()?;

    let mut tx = pool.begin().await?;

    let product = product_repo::find_for_update(&mut *tx, product_id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    if !product.is_purchasable {
        return Err(AppError::InvalidRequest(
            "product is not purchasable".to_string(),
        ));
    }

    let bank_account = bank_account_repo::find_by_id(&mut *tx, bank_account_id)
        .await?
        .ok_or(AppError::NotFound("Bank account"))?;
    if bank_account.user_id != product.user_id {
        return Err(AppError::InvalidRequest(
            "bank account does not belong to the seller".to_string(),
        ));
    }

    let quantity = i64::from(request.quantity);
    if product.stock < quantity {
        return Err(AppError::InvalidRequest("insufficient stock".to_string()));
    }

    product_repo::set_stock(&mut *tx, product_id, product.stock - quantity).await?;
    let payment = payment_repo::insert(
        &mut *tx,
        &NewPayment {
            user_id: buyer_id,
            product_id,
            bank_account_id,
            payment_proof_image_url: request.payment_proof_image_url,
            quantity: request.quantity,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        payment_id = %payment.id,
        product_id = %product_id,
        buyer_id = %buyer_id,
        quantity = payment.quantity,
        "product_bought"
    );
    Ok(())
}

/// 404 when the product is missing, 403 when `user_id` is not the seller.
async fn ensure_owner<'e>(
    executor: impl PgExecutor<'e>,
    product_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    let owner = product_repo::find_owner(executor, product_id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    if owner != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Tags in first-seen order without duplicates.
fn unique_tags(tags: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(tag) {
            unique.push(tag.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_tags_are_dropped_in_order() {
        let tags = vec![
            "keyboard".to_string(),
            "usb".to_string(),
            "keyboard".to_string(),
        ];
        assert_eq!(unique_tags(&tags), vec!["keyboard", "usb"]);
    }

    #[tokio::test]
    async fn user_only_search_requires_owner() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/marketplace_test")
            .unwrap();
        let filter = ProductFilter {
            user_only: true,
            ..ProductFilter::default()
        };

        let result = search(&pool, filter).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
