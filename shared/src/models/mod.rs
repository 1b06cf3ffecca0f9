//! Data models
//!
//! Entities held by the portal store plus the form payloads that write them.
//! All IDs are `i64` counters allocated by the store and never reused.
//! Serialized field names are camelCase.

pub mod account;
pub mod department;
pub mod employee;
pub mod request;
pub mod role;

// Re-exports
pub use account::*;
pub use department::*;
pub use employee::*;
pub use request::*;
pub use role::*;
