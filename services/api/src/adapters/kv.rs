//! services/api/src/adapters/kv.rs
//!
//! Key-value store adapters: the concrete implementations of the
//! `KeyValueStore` port from the core crate.
//!
//! `JsonFileStore` persists the whole map to a single JSON file on every
//! write, which is plenty for per-user records of this size and keeps the
//! data portable. `MemoryStore` backs tests and ephemeral runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use craveshield_core::ports::{KeyValueStore, PortError, PortResult};
use tokio::sync::RwLock;
use tracing::warn;

//=========================================================================================
// JsonFileStore
//=========================================================================================

/// A file-backed store: one JSON object holding every key.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Opens (or creates) the store at `path`.
    ///
    /// A missing file starts an empty store. An unreadable or malformed file
    /// is logged and also starts empty rather than failing startup; the core
    /// treats storage read failures as "no record".
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "store file is malformed, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    async fn flush(&self, entries: &HashMap<String, String>) -> PortResult<()> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries).await
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        self.flush(&entries).await
    }
}

//=========================================================================================
// MemoryStore
//=========================================================================================

/// An in-memory store for tests and ephemeral runs. Contents are lost on
/// drop.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("craveshield-kv-test-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let path = temp_store_path();
        let store = JsonFileStore::open(&path).await.unwrap();

        store.set("craveshield-savings-abc", "{\"x\":1}").await.unwrap();
        assert_eq!(
            store.get("craveshield-savings-abc").await.unwrap(),
            Some("{\"x\":1}".to_string())
        );

        store.remove("craveshield-savings-abc").await.unwrap();
        assert_eq!(store.get("craveshield-savings-abc").await.unwrap(), None);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn contents_survive_reopening() {
        let path = temp_store_path();
        {
            let store = JsonFileStore::open(&path).await.unwrap();
            store.set("key", "value").await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("key").await.unwrap(), Some("value".to_string()));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_file_starts_empty() {
        let path = temp_store_path();
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let store = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(store.get("anything").await.unwrap(), None);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn missing_key_is_none_not_error() {
        let store = MemoryStore::default();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }
}
