//! Form handlers
//!
//! Each handler validates its input completely, then mutates the
//! [`Store`](crate::storage::Store) in memory. Persisting and re-rendering
//! is left to the caller, so a rejected operation leaves the store untouched.

pub mod accounts;
pub mod departments;
pub mod employees;
pub mod registration;
pub mod requests;
