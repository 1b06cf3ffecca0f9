//! Input validation helpers
//!
//! Text length limits and the field checks shared by every form handler.

use shared::error::{AppError, AppResult, ErrorCode};
use validator::ValidateEmail;

// ── Text length limits ──────────────────────────────────────────────

/// Names: first/last name, department, position, item names
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: employee code, request type
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 6;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    validate_optional_text(value, field, max_len)
}

/// Validate that an optional string is within the length limit.
pub fn validate_optional_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate an already normalized email address.
pub fn validate_email(email: &str) -> AppResult<()> {
    validate_required_text(email, "Email", MAX_EMAIL_LEN)?;
    if !email.validate_email() {
        return Err(AppError::validation("Please enter a valid email address.")
            .with_detail("field", "email"));
    }
    Ok(())
}

/// Validate a new password's length.
pub fn validate_password(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password is too long (max {MAX_PASSWORD_LEN} chars)"
        )));
    }
    Ok(())
}
