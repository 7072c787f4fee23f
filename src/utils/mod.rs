use crate::error::{AppError, AppResult};

/// Parse a path segment as a record identifier.
///
/// Only plain unsigned digit strings are accepted; anything else (empty,
/// signed, float, text) is rejected before it can reach the database, so a
/// malformed id and a storage-level type error never look different to the
/// client.
pub fn parse_id(raw: &str) -> AppResult<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::InvalidQuery);
    }
    raw.parse::<i32>().map_err(|_| AppError::InvalidQuery)
}
