//! Product HTTP handlers.
//!
//! This module implements the product-related API endpoints:
//! - GET /v1/product - Search products (public)
//! - GET /v1/product/{product_id} - Product detail with seller (public)
//! - POST /v1/product - Create a product
//! - PATCH /v1/product/{product_id} - Update a product
//! - DELETE /v1/product/{product_id} - Delete a product
//! - POST /v1/product/{product_id}/stock - Set stock
//! - POST /v1/product/{product_id}/buy - Buy a product

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};

use crate::{
    AppState,
    error::AppError,
    extract::{AppJson, parse_id},
    middleware::auth::{AuthContext, bearer_user_id},
    models::{
        product::{
            BuyRequest, ChangeStockRequest, CreateProductRequest, ProductDetailResponse,
            ProductFilter, ProductResponse, UpdateProductRequest,
        },
        response::{ApiResponse, PageResponse},
    },
    services::product_service,
};

/// Search products.
///
/// # Endpoint
///
/// `GET /v1/product?userOnly=&limit=&offset=&tags=&condition=&showEmptyStock=&maxPrice=&minPrice=&sortBy=&orderBy=&search=`
///
/// # Authentication
///
/// Public, except that `userOnly=true` needs a bearer token: none gives 403,
/// a bad one gives 401.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "message": "ok",
///   "data": [ { "productId": "...", "name": "...", "purchaseCount": 0, ... } ],
///   "meta": { "limit": 10, "offset": 0, "total": 1 }
/// }
/// ```
pub async fn search_products(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PageResponse<ProductResponse>>, AppError> {
    let mut filter = ProductFilter::from_query(&params);
    if filter.user_only {
        filter.owner_id = bearer_user_id(&headers, &state.config.jwt_secret)?;
    }

    let page = product_service::search(&state.pool, filter).await?;
    Ok(Json(page))
}

/// Get one product with its seller's name, sales total and bank accounts.
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "ok", "data": {"product": {...}, "seller": {...}}}`
/// - **Error (404)**: unknown or malformed id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<ProductDetailResponse>>, AppError> {
    let product_id = parse_id(&product_id, "Product")?;

    let detail = product_service::get_detail(&state.pool, product_id).await?;
    Ok(Json(ApiResponse::new("ok", detail)))
}

/// Create a product owned by the caller.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Mechanical keyboard",
///   "price": 450000,
///   "imageUrl": "https://cdn.example.com/keyboard.jpg",
///   "stock": 12,
///   "condition": "new",
///   "tags": ["keyboard"],
///   "isPurchasable": true
/// }
/// ```
pub async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<CreateProductRequest>,
) -> Result<StatusCode, AppError> {
    product_service::create(&state.pool, auth.user_id, request).await?;
    Ok(StatusCode::OK)
}

/// Update a product. 404 for unknown ids, 403 when the caller is not the seller.
pub async fn update_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(product_id): Path<String>,
    AppJson(request): AppJson<UpdateProductRequest>,
) -> Result<StatusCode, AppError> {
    let product_id = parse_id(&product_id, "Product")?;

    product_service::update(&state.pool, auth.user_id, product_id, request).await?;
    Ok(StatusCode::OK)
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let product_id = parse_id(&product_id, "Product")?;

    product_service::delete(&state.pool, auth.user_id, product_id).await?;
    Ok(StatusCode::OK)
}

pub async fn change_stock(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(product_id): Path<String>,
    AppJson(request): AppJson<ChangeStockRequest>,
) -> Result<StatusCode, AppError> {
    let product_id = parse_id(&product_id, "Product")?;

    product_service::change_stock(&state.pool, auth.user_id, product_id, request).await?;
    Ok(StatusCode::OK)
}

/// Buy a product.
///
/// # Request Body
///
/// ```json
/// {
///   "bankAccountId": "550e8400-e29b-41d4-a716-446655440000",
///   "paymentProofImageUrl": "https://cdn.example.com/proof.jpg",
///   "quantity": 2
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: empty body
/// - **Error (400)**: not purchasable, not enough stock, or the bank account
///   is not the seller's
/// - **Error (404)**: product or bank account not found
pub async fn buy_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(product_id): Path<String>,
    AppJson(request): AppJson<BuyRequest>,
) -> Result<StatusCode, AppError> {
    let product_id = parse_id(&product_id, "Product")?;

    product_service::buy(&state.pool, auth.user_id, product_id, request).await?;
    Ok(StatusCode::OK)
}
