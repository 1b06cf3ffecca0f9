//! redb-backed key-value slots

use super::KvStore;
use redb::{Database, ReadableDatabase, TableDefinition};
use shared::error::{AppError, AppResult};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Local storage table: key = slot name, value = string payload
const LOCAL_STORAGE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "Local storage failure");
        AppError::database(err.to_string())
    }
}

/// Persistent key-value storage in a single redb file
#[derive(Clone)]
pub struct RedbKv {
    db: Arc<Database>,
}

impl RedbKv {
    /// Open or create the database file (parent directories included)
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> StorageResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl KvStore for RedbKv {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        tracing::debug!(key, bytes = value.len(), "Writing local storage slot");
        Ok(self.write(key, value)?)
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        Ok(self.delete(key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_slots() {
        let mut kv = RedbKv::open_in_memory().unwrap();
        assert_eq!(kv.get("auth_token").unwrap(), None);

        kv.set("auth_token", "admin@example.com").unwrap();
        assert_eq!(
            kv.get("auth_token").unwrap().as_deref(),
            Some("admin@example.com")
        );

        kv.remove("auth_token").unwrap();
        assert_eq!(kv.get("auth_token").unwrap(), None);
        // Removing a missing key is not an error
        kv.remove("auth_token").unwrap();
    }

    #[test]
    fn test_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("portal.redb");

        {
            let mut kv = RedbKv::open(&path).unwrap();
            kv.set("ipt_demo_v1", "{\"x\":1}").unwrap();
        }

        let kv = RedbKv::open(&path).unwrap();
        assert_eq!(kv.get("ipt_demo_v1").unwrap().as_deref(), Some("{\"x\":1}"));
    }
}
