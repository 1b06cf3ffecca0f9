//! Unified error codes for the staff portal
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors
//! - 4xxx: Department errors
//! - 5xxx: Employee errors
//! - 6xxx: Request errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so that codes survive serialization unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Required field missing
    RequiredField = 7,
    /// Operation cancelled by the user
    Cancelled = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email, password or unverified account)
    InvalidCredentials = 1002,
    /// Password too short
    PasswordTooShort = 1003,
    /// Email already registered
    EmailAlreadyRegistered = 1004,
    /// No registration is waiting for verification
    NoPendingVerification = 1005,
    /// Current password did not match
    CurrentPasswordMismatch = 1006,

    // ==================== 2xxx: Permission ====================
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Account ====================
    /// Account not found
    AccountNotFound = 3001,
    /// Email already used by another account
    EmailInUse = 3002,
    /// Cannot delete the signed-in account
    CannotDeleteSelf = 3003,
    /// Own password must be changed from the profile page
    CannotResetOwnPassword = 3004,

    // ==================== 4xxx: Department ====================
    /// Department not found
    DepartmentNotFound = 4001,

    // ==================== 5xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 5001,
    /// No account matches the employee email
    EmployeeAccountNotFound = 5002,

    // ==================== 6xxx: Request ====================
    /// Request has no named items
    RequestItemsRequired = 6002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Password hashing failed
    PasswordHashFailed = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the user-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::Cancelled => "Operation cancelled",

            // Auth
            ErrorCode::NotAuthenticated => "Please log in first.",
            ErrorCode::InvalidCredentials => "Invalid email, password, or unverified account.",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters.",
            ErrorCode::EmailAlreadyRegistered => "Email already registered.",
            ErrorCode::NoPendingVerification => "No registration is waiting for verification.",
            ErrorCode::CurrentPasswordMismatch => "Current password is incorrect.",

            // Permission
            ErrorCode::AdminRequired => "Administrator role is required",

            // Account
            ErrorCode::AccountNotFound => "Account not found.",
            ErrorCode::EmailInUse => "Email already in use.",
            ErrorCode::CannotDeleteSelf => "Cannot delete your own account.",
            ErrorCode::CannotResetOwnPassword => "Use profile to change your own password.",

            // Department
            ErrorCode::DepartmentNotFound => "Department not found.",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found.",
            ErrorCode::EmployeeAccountNotFound => "No account found with that email.",

            // Request
            ErrorCode::RequestItemsRequired => "Add at least one item.",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::PasswordHashFailed => "Failed to hash password",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::Cancelled),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::PasswordTooShort),
            1004 => Ok(ErrorCode::EmailAlreadyRegistered),
            1005 => Ok(ErrorCode::NoPendingVerification),
            1006 => Ok(ErrorCode::CurrentPasswordMismatch),

            // Permission
            2003 => Ok(ErrorCode::AdminRequired),

            // Account
            3001 => Ok(ErrorCode::AccountNotFound),
            3002 => Ok(ErrorCode::EmailInUse),
            3003 => Ok(ErrorCode::CannotDeleteSelf),
            3004 => Ok(ErrorCode::CannotResetOwnPassword),

            // Department
            4001 => Ok(ErrorCode::DepartmentNotFound),

            // Employee
            5001 => Ok(ErrorCode::EmployeeNotFound),
            5002 => Ok(ErrorCode::EmployeeAccountNotFound),

            // Request
            6002 => Ok(ErrorCode::RequestItemsRequired),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::PasswordHashFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
