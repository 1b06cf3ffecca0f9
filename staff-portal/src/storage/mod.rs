//! Persistence layer
//!
//! - [`KvStore`]: string key-value slots (the local-storage contract)
//! - [`RedbKv`]: file-backed slots in a redb database
//! - [`MemoryKv`]: process-lifetime slots for session data and tests
//! - [`Store`]: the whole entity collection, loaded and saved as one JSON value

mod kv;
mod redb_kv;
mod store;

pub use kv::{KvStore, MemoryKv};
pub use redb_kv::{RedbKv, StorageError, StorageResult};
pub use store::{NextId, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, Store};

/// Key of the serialized store
pub const STORE_KEY: &str = "ipt_demo_v1";
/// Key of the session token (the signed-in account's email)
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Key of the email waiting for verification
pub const PENDING_EMAIL_KEY: &str = "unverified_email";
/// Session-scoped key set right after a successful verification
pub const JUST_VERIFIED_KEY: &str = "emailVerified";
