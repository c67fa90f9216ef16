//! Payment record created when a buyer purchases a product.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents a payment record from the database.
///
/// # Database Table
///
/// Maps to the `payments` table. `quantity` units of `product_id` were bought
/// by `user_id`, paid to the seller's `bank_account_id`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Payment {
    pub id: Uuid,

    /// Buyer
    pub user_id: Uuid,

    pub product_id: Uuid,

    /// `None` once the seller has deleted the bank account
    pub bank_account_id: Option<Uuid>,

    /// Link to the uploaded transfer receipt
    pub payment_proof_image_url: String,

    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Values needed to insert a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub bank_account_id: Uuid,
    pub payment_proof_image_url: String,
    pub quantity: i32,
}
