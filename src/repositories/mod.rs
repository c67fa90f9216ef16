//! Data access layer.
//!
//! Each repository is a set of free functions issuing parameterized SQL. They
//! take any `PgExecutor`, so services can pass either the pool or an open
//! transaction (`&mut *tx`) when several statements must commit together.

pub mod bank_account_repo;
pub mod friend_repo;
pub mod payment_repo;
pub mod product_repo;
pub mod tag_repo;
pub mod user_repo;

/// Escape `%`, `_` and `\` so user input matches literally inside `LIKE`.
pub(crate) fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
