//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They validate input, enforce ownership and manage database transactions.

pub mod auth_service;
pub mod bank_account_service;
pub mod file_service;
pub mod friend_service;
pub mod product_service;
pub mod storage;
pub mod user_service;
