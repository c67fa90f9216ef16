//! Bank account data models and API request/response types.
//!
//! Sellers register bank accounts so buyers know where to transfer money.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::validation;

/// Represents a bank account record from the database.
///
/// # Database Table
///
/// Maps to the `bank_accounts` table. Only the owning user (`user_id`) may
/// update or delete the row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BankAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or updating a bank account.
///
/// # JSON Example
///
/// ```json
/// {
///   "bankName": "Bank Jago",
///   "bankAccountName": "Jane Doe",
///   "bankAccountNumber": "1234567890"
/// }
/// ```
///
/// # Validation
///
/// Every field must be between 5 and 15 characters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountRequest {
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
}

impl BankAccountRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validation::length("bankName", &self.bank_name, 5, 15)?;
        validation::length("bankAccountName", &self.bank_account_name, 5, 15)?;
        validation::length("bankAccountNumber", &self.bank_account_number, 5, 15)
    }
}

/// Bank account as returned to API clients (owner id omitted).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountResponse {
    pub bank_account_id: Uuid,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
}

impl From<BankAccount> for BankAccountResponse {
    fn from(account: BankAccount) -> Self {
        Self {
            bank_account_id: account.id,
            bank_name: account.bank_name,
            bank_account_name: account.bank_account_name,
            bank_account_number: account.bank_account_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_is_length_checked() {
        let valid = BankAccountRequest {
            bank_name: "Bank Jago".into(),
            bank_account_name: "Jane Doe".into(),
            bank_account_number: "1234567890".into(),
        };
        assert!(valid.validate().is_ok());

        let short_number = BankAccountRequest {
            bank_account_number: "123".into(),
            ..valid
        };
        let err = short_number.validate().unwrap_err();
        assert!(err.to_string().contains("bankAccountNumber"));
    }

    #[test]
    fn response_hides_owner() {
        let account = BankAccount {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            bank_name: "Bank Jago".into(),
            bank_account_name: "Jane Doe".into(),
            bank_account_number: "1234567890".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(BankAccountResponse::from(account.clone())).unwrap();

        assert_eq!(json["bankAccountId"], account.id.to_string());
        assert!(json.get("userId").is_none());
    }
}
