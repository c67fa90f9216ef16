//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, path, query, multipart)
//! 2. Delegates to a service
//! 3. Returns HTTP response (JSON, status code)

pub mod bank_accounts;
pub mod files;
pub mod friends;
pub mod health;
pub mod products;
pub mod users;
