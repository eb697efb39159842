use crate::storage::{KeyValueStore, StorageError};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

/// Stores every key as `<directory>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        FileStore { directory: directory.into() }
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.directory.join(format!("{}.json", key)))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        source,
        path: path.to_path_buf(),
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path)(err)),
        }
    }

    #[instrument(skip(self, value))]
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        fs::create_dir_all(&self.directory).await.map_err(io_error(&self.directory))?;

        // Write then rename so readers never observe a partially written value
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).await.map_err(io_error(&temp_path))?;
        fs::rename(&temp_path, &path).await.map_err(io_error(&path))?;

        debug!(path = %path.display(), "💾 Stored '{}'", key);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&path)(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn store(name: &str) -> FileStore {
        FileStore::new(temp_dir().join(format!("geocheck-file-store-{}-{}", name, std::process::id())))
    }

    #[tokio::test]
    async fn set_then_get_returns_the_value() -> Result<(), StorageError> {
        let store = store("set-get");

        store.set_item("queue", r#"["t1"]"#).await?;

        assert_eq!(store.get_item("queue").await?, Some(r#"["t1"]"#.to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn missing_key_is_absent() -> Result<(), StorageError> {
        assert_eq!(store("missing").get_item("nothing").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn remove_deletes_the_file_and_tolerates_absent_keys() -> Result<(), StorageError> {
        let store = store("remove");
        store.set_item("queue", "[]").await?;

        store.remove_item("queue").await?;
        store.remove_item("queue").await?;

        assert_eq!(store.get_item("queue").await?, None);
        assert!(!store.path("queue")?.exists());
        Ok(())
    }

    #[tokio::test]
    async fn keys_cannot_escape_the_directory() {
        let result = store("escape").set_item("../outside", "x").await;

        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
