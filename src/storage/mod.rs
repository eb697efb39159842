mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Local string key-value persistence.
#[async_trait]
pub trait KeyValueStore: Debug + Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("{}", source)]
    Io { source: io::Error, path: PathBuf },
}
