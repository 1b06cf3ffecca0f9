//! Authentication
//!
//! - [`Passwords`]: argon2 hashing and verification
//! - [`AuthState`] / [`SessionUser`]: the current session and its presentation flags

mod password;
mod session;

pub use password::Passwords;
pub use session::{AuthState, Presentation, SessionUser};
