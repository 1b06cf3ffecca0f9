//! Utility module
//!
//! - [`AppError`] / [`AppResult`] re-exported from `shared::error`
//! - logging setup
//! - form field validation

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
