//! Bank account service - sellers' payout accounts.

use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::bank_account::{BankAccountRequest, BankAccountResponse},
    repositories::bank_account_repo,
};

pub async fn create(
    pool: &DbPool,
    user_id: Uuid,
    request: BankAccountRequest,
) -> Result<(), AppError> {
    request.validate()?;

    let account = bank_account_repo::insert(pool, user_id, &request).await?;

    tracing::info!(bank_account_id = %account.id, user_id = %user_id, "bank_account_created");
    Ok(())
}

pub async fn list(pool: &DbPool, user_id: Uuid) -> Result<Vec<BankAccountResponse>, AppError> {
    let accounts = bank_account_repo::list_for_user(pool, user_id).await?;

    Ok(accounts.into_iter().map(Into::into).collect())
}

/// Update an account in place; its id does not change.
pub async fn update(
    pool: &DbPool,
    user_id: Uuid,
    bank_account_id: Uuid,
    request: BankAccountRequest,
) -> Result<(), AppError> {
    request.validate()?;

    ensure_owner(pool, bank_account_id, user_id).await?;
    bank_account_repo::update(pool, bank_account_id, &request).await?;

    tracing::info!(bank_account_id = %bank_account_id, "bank_account_updated");
    Ok(())
}

pub async fn delete(pool: &DbPool, user_id: Uuid, bank_account_id: Uuid) -> Result<(), AppError> {
    ensure_owner(pool, bank_account_id, user_id).await?;
    bank_account_repo::delete(pool, bank_account_id).await?;

    tracing::info!(bank_account_id = %bank_account_id, "bank_account_deleted");
    Ok(())
}

async fn ensure_owner(pool: &DbPool, bank_account_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    let account = bank_account_repo::find_by_id(pool, bank_account_id)
        .await?
        .ok_or(AppError::NotFound("Bank account"))?;

    if account.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}
