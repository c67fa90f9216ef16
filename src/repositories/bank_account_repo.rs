//! SQL for the `bank_accounts` table.

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::bank_account::{BankAccount, BankAccountRequest},
};

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    request: &BankAccountRequest,
) -> Result<BankAccount, AppError> {
    let account = sqlx::query_as::<_, BankAccount>(
        r#"
        INSERT INTO bank_accounts (user_id, bank_name, bank_account_name, bank_account_number)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, bank_name, bank_account_name, bank_account_number, created_at
        "#,
    )
    .bind(user_id)
    .bind(&request.bank_name)
    .bind(&request.bank_account_name)
    .bind(&request.bank_account_number)
    .fetch_one(executor)
    .await?;

    Ok(account)
}

/// All bank accounts of a user, oldest first.
pub async fn list_for_user<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
) -> Result<Vec<BankAccount>, AppError> {
    let accounts = sqlx::query_as::<_, BankAccount>(
        r#"
        SELECT id, user_id, bank_name, bank_account_name, bank_account_number, created_at
        FROM bank_accounts
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    Ok(accounts)
}

pub async fn find_by_id<'e>(
    executor: impl PgExecutor<'e>,
    bank_account_id: Uuid,
) -> Result<Option<BankAccount>, AppError> {
    let account = sqlx::query_as::<_, BankAccount>(
        r#"
        SELECT id, user_id, bank_name, bank_account_name, bank_account_number, created_at
        FROM bank_accounts
        WHERE id = $1
        "#,
    )
    .bind(bank_account_id)
    .fetch_optional(executor)
    .await?;

    Ok(account)
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    bank_account_id: Uuid,
    request: &BankAccountRequest,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE bank_accounts
        SET bank_name = $1, bank_account_name = $2, bank_account_number = $3
        WHERE id = $4
        "#,
    )
    .bind(&request.bank_name)
    .bind(&request.bank_account_name)
    .bind(&request.bank_account_number)
    .bind(bank_account_id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete<'e>(
    executor: impl PgExecutor<'e>,
    bank_account_id: Uuid,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM bank_accounts WHERE id = $1")
        .bind(bank_account_id)
        .execute(executor)
        .await?;

    Ok(())
}
