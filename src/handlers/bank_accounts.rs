//! Bank account HTTP handlers.
//!
//! - POST /v1/bank/account
//! - GET /v1/bank/account
//! - PATCH /v1/bank/account/{bank_account_id}
//! - DELETE /v1/bank/account/{bank_account_id}

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::AppError,
    extract::{AppJson, parse_id},
    middleware::auth::AuthContext,
    models::{
        bank_account::{BankAccountRequest, BankAccountResponse},
        response::ApiResponse,
    },
    services::bank_account_service,
};

pub async fn create_bank_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(request): AppJson<BankAccountRequest>,
) -> Result<StatusCode, AppError> {
    bank_account_service::create(&state.pool, auth.user_id, request).await?;
    Ok(StatusCode::OK)
}

/// List the caller's bank accounts, oldest first.
///
/// ```json
/// {
///   "message": "success",
///   "data": [
///     {
///       "bankAccountId": "550e8400-e29b-41d4-a716-446655440000",
///       "bankName": "Bank Jago",
///       "bankAccountName": "Jane Doe",
///       "bankAccountNumber": "1234567890"
///     }
///   ]
/// }
/// ```
pub async fn list_bank_accounts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ApiResponse<Vec<BankAccountResponse>>>, AppError> {
    let accounts = bank_account_service::list(&state.pool, auth.user_id).await?;
    Ok(Json(ApiResponse::new("success", accounts)))
}

pub async fn update_bank_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(bank_account_id): Path<String>,
    AppJson(request): AppJson<BankAccountRequest>,
) -> Result<StatusCode, AppError> {
    let bank_account_id = parse_id(&bank_account_id, "Bank account")?;

    bank_account_service::update(&state.pool, auth.user_id, bank_account_id, request).await?;
    Ok(StatusCode::OK)
}

/// `PATCH /v1/bank/account` without an id names no account.
pub async fn update_bank_account_without_id() -> AppError {
    AppError::NotFound("Bank account")
}

pub async fn delete_bank_account(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(bank_account_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let bank_account_id = parse_id(&bank_account_id, "Bank account")?;

    bank_account_service::delete(&state.pool, auth.user_id, bank_account_id).await?;
    Ok(StatusCode::OK)
}
