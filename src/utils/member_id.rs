//! Login identifier validation.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use crate::error::AppError;

pub const MEMBER_ID_MAX_LEN: usize = 50;

/// Allowed characters for login identifiers.
pub static LOGIN_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.@-]+$").expect("login id pattern compiles"));

/// Validates a login identifier for new members.
///
/// # Rules
///
/// - Length: 1-50 characters
/// - Characters: ASCII letters, digits, `_`, `.`, `@`, `-`
///
/// # Errors
///
/// Returns [`AppError::Validation`] describing the first rule that fails.
pub fn validate_member_id(member_id: &str) -> Result<(), AppError> {
    if member_id.is_empty() || member_id.len() > MEMBER_ID_MAX_LEN {
        return Err(AppError::bad_request(
            "Invalid login id length",
            json!({ "min": 1, "max": MEMBER_ID_MAX_LEN, "actual": member_id.len() }),
        ));
    }

    if !LOGIN_ID_REGEX.is_match(member_id) {
        return Err(AppError::bad_request(
            "Login id contains invalid characters",
            json!({ "allowed": "A-Z a-z 0-9 _ . @ -" }),
        ));
    }

    Ok(())
}
