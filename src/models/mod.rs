//! Data models representing database entities and API payloads.

/// Seller bank accounts
pub mod bank_account;
/// Image upload payloads
pub mod file;
/// Friendship edges and listings
pub mod friend;
/// Purchase records
pub mod payment;
/// Products, tags and the search filter
pub mod product;
/// Success envelopes
pub mod response;
/// Registered users
pub mod user;
pub mod validation;
