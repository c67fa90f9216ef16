//! SQL for the `payments` table.

use sqlx::PgExecutor;

use crate::{
    error::AppError,
    models::payment::{NewPayment, Payment},
};

pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    payment: &NewPayment,
) -> Result<Payment, AppError> {
    let payment = sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (
            user_id,
            product_id,
            bank_account_id,
            payment_proof_image_url,
            quantity
        )
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, product_id, bank_account_id, payment_proof_image_url, quantity, created_at
        "#,
    )
    .bind(payment.user_id)
    .bind(payment.product_id)
    .bind(payment.bank_account_id)
    .bind(&payment.payment_proof_image_url)
    .bind(payment.quantity)
    .fetch_one(executor)
    .await?;

    Ok(payment)
}
