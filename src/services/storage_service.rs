use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::StorageError;

/// Durable key-value persistence, the stand-in for on-device storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Single-file JSON map. One lock serializes read-modify-write cycles.
pub struct FileStorageService {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorageService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStorageService {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

/// Volatile map, for tests and embedders that do not want a file on disk.
pub struct MemoryStorageService {
    entries: StdMutex<HashMap<String, String>>,
}

impl MemoryStorageService {
    pub fn new() -> Self {
        Self {
            entries: StdMutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStorageService {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStorageService::new(dir.path().join("storage.json"));

        assert_eq!(store.get("userToken").await.expect("get"), None);

        store.set("userToken", "u1").await.expect("set");
        store.set("userData", "{\"id\":\"u1\"}").await.expect("set");
        assert_eq!(
            store.get("userToken").await.expect("get"),
            Some("u1".to_string())
        );

        // A fresh handle over the same file sees the persisted values.
        let reopened = FileStorageService::new(dir.path().join("storage.json"));
        assert_eq!(
            reopened.get("userData").await.expect("get"),
            Some("{\"id\":\"u1\"}".to_string())
        );

        store.remove("userToken").await.expect("remove");
        assert_eq!(store.get("userToken").await.expect("get"), None);
        // Removing an absent key is a no-op.
        store.remove("userToken").await.expect("remove");
    }

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStorageService::new();
        store.set("k", "v").await.expect("set");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
        store.remove("k").await.expect("remove");
        assert_eq!(store.get("k").await.expect("get"), None);
    }
}
