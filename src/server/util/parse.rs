//! Parsing of ids typed by users.

use crate::server::error::AppError;

/// Parses a message id typed by a user into a snowflake.
///
/// # Returns
/// - `Ok(u64)` - The parsed id
/// - `Err(AppError::BadRequest)` - The input is not a positive integer
pub fn parse_message_id(value: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest(format!("'{}' is not a valid message ID.", value)))
}
