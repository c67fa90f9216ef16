//! Marketplace API - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Set up image storage (optional)
//! 5. Build HTTP router with routes and middleware
//! 6. Start server on configured port

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use marketplace_api::{
    AppState, build_router,
    config::Config,
    db,
    services::storage::{ImageStore, S3ImageStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.connection_url()?, config.db_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let storage: Option<Arc<dyn ImageStore>> = match config.storage() {
        Some(storage_config) => {
            tracing::info!(bucket = %storage_config.bucket, "Image storage configured");
            Some(Arc::new(S3ImageStore::new(storage_config)?))
        }
        None => {
            tracing::warn!("S3_* variables not set, image uploads will fail");
            None
        }
    };

    let addr = format!("0.0.0.0:{}", config.server_port);
    let app = build_router(AppState {
        pool,
        config: Arc::new(config),
        storage,
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
