//! Shared types for the staff portal
//!
//! Entity models, the unified error system and small helpers used by
//! both the portal library and its console front-end.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
