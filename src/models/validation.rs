//! Field-level validation rules shared by the request models.
//!
//! Every check returns `AppError::InvalidRequest` naming the offending field
//! so clients get a precise 400.

use crate::error::AppError;

/// Require `value` to be between `min` and `max` characters (inclusive).
pub fn length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::InvalidRequest(format!(
            "{} must be between {} and {} characters",
            field, min, max
        )));
    }
    Ok(())
}

/// Require a non-negative number.
pub fn non_negative(field: &str, value: i64) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::InvalidRequest(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}

/// Require an absolute http(s) URL whose host looks like a real domain.
///
/// `http://incomplete` parses as a URL but is rejected here.
pub fn url(field: &str, value: &str) -> Result<(), AppError> {
    let invalid = || AppError::InvalidRequest(format!("{} must be a valid URL", field));

    let parsed = url::Url::parse(value).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }

    match parsed.host_str() {
        Some(host) if host.contains('.') && !host.ends_with('.') && !host.starts_with('.') => {
            Ok(())
        }
        _ => Err(invalid()),
    }
}

/// Require a plausible e-mail address: one `@`, a non-empty local part and a
/// dotted domain without whitespace.
pub fn email(field: &str, value: &str) -> Result<(), AppError> {
    let invalid = || AppError::InvalidRequest(format!("{} must be a valid email", field));

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let valid_domain =
        domain.contains('.') && domain.split('.').all(|label| !label.is_empty());
    if !valid_domain {
        return Err(invalid());
    }
    Ok(())
}

/// Require an international phone number: leading `+`, then digits (spaces
/// and dashes allowed), 7 to 13 characters overall.
pub fn phone(field: &str, value: &str) -> Result<(), AppError> {
    let invalid = || {
        AppError::InvalidRequest(format!(
            "{} must start with + and be between 7 and 13 characters",
            field
        ))
    };

    let rest = value.strip_prefix('+').ok_or_else(invalid)?;
    length(field, value, 7, 13).map_err(|_| invalid())?;
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == ' ')
    {
        return Err(invalid());
    }
    Ok(())
}
