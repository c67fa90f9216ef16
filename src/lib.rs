//! Marketplace API - users, products, purchases, bank accounts and friends.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: HS256 JWT bearer tokens, Argon2 password hashes
//! - **Images**: S3 object storage
//! - **Format**: JSON requests/responses
//!
//! Requests flow handler -> service -> repository. Handlers deal with HTTP,
//! services own validation, ownership checks and transactions, repositories
//! issue parameterized SQL.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, db::DbPool, services::storage::ImageStore};

/// Request body cap for image uploads; leaves room for multipart framing
/// around a 2 MiB file.
const MAX_UPLOAD_BODY: usize = 3 * 1024 * 1024;

/// State shared with every handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,

    /// `None` when no object storage is configured; uploads then fail with 500
    pub storage: Option<Arc<dyn ImageStore>>,
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    use handlers::{bank_accounts, files, friends, health, products, users};

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/v1/user/register", post(users::register))
        .route("/v1/user/login", post(users::login))
        .route("/v1/product", get(products::search_products))
        .route("/v1/product/{product_id}", get(products::get_product));

    let authenticated_routes = Router::new()
        // User profile
        .route("/v1/user", patch(users::update_account))
        .route("/v1/user/link/email", post(users::link_email))
        .route("/v1/user/link/phone", post(users::link_phone))
        // Images
        .route(
            "/v1/image",
            post(files::upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
        // Products
        .route("/v1/product", post(products::create_product))
        .route(
            "/v1/product/{product_id}",
            patch(products::update_product).delete(products::delete_product),
        )
        .route(
            "/v1/product/{product_id}/stock",
            post(products::change_stock),
        )
        .route("/v1/product/{product_id}/buy", post(products::buy_product))
        // Bank accounts
        .route(
            "/v1/bank/account",
            post(bank_accounts::create_bank_account)
                .get(bank_accounts::list_bank_accounts)
                .patch(bank_accounts::update_bank_account_without_id),
        )
        .route(
            "/v1/bank/account/{bank_account_id}",
            patch(bank_accounts::update_bank_account).delete(bank_accounts::delete_bank_account),
        )
        // Friends
        .route(
            "/v1/friend",
            post(friends::add_friend)
                .delete(friends::remove_friend)
                .get(friends::list_friends),
        )
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
