//! Storage abstractions for the data layer
//!
//! Every collection lives under its own key as a JSON array. Backends only
//! need whole-value get/set; `set_many` must write all of its entries or
//! none of them.

pub mod json_map_store;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use configs::{StorageBackend, StorageConfig};
use serde_json::Value;
use tracing::info;

use crate::errors::ServiceError;
use json_map_store::JsonMapStore;
use memory::MemoryStorage;

/// Keys the collections are persisted under.
pub mod keys {
    pub const EMPLOYEES: &str = "aaf_employees_data";
    pub const VACATIONS: &str = "aaf_vacations_data";
    pub const ABSENCES: &str = "aaf_absences_data";
}

/// Injected key-value persistence. Implementations can be in-memory,
/// file-backed, or anything else that can commit several keys atomically.
#[async_trait]
pub trait KvStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        self.set_many(vec![(key.to_string(), value)]).await
    }

    /// Write every entry as one commit.
    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), ServiceError>;
}

/// Open the backend selected in configuration.
pub async fn open(cfg: &StorageConfig) -> Result<Arc<dyn KvStorage>, ServiceError> {
    match cfg.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "opening storage");
            let storage: Arc<dyn KvStorage> = MemoryStorage::new();
            Ok(storage)
        }
        StorageBackend::File => {
            info!(backend = "file", path = %cfg.path.display(), "opening storage");
            let storage: Arc<dyn KvStorage> = JsonMapStore::<String, Value>::new(&cfg.path).await?;
            Ok(storage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn open_memory_backend() -> Result<(), anyhow::Error> {
        let cfg = StorageConfig { backend: StorageBackend::Memory, path: Default::default() };
        let storage = open(&cfg).await?;
        assert!(storage.get(keys::EMPLOYEES).await?.is_none());
        storage.set(keys::EMPLOYEES, json!([])).await?;
        assert_eq!(storage.get(keys::EMPLOYEES).await?, Some(json!([])));
        Ok(())
    }

    #[tokio::test]
    async fn open_file_backend_creates_file() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("vt_open_{}/store.json", uuid::Uuid::new_v4()));
        let cfg = StorageConfig { backend: StorageBackend::File, path: path.clone() };
        let storage = open(&cfg).await?;
        assert!(storage.get(keys::VACATIONS).await?.is_none());
        assert!(tokio::fs::metadata(&path).await.is_ok());
        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
