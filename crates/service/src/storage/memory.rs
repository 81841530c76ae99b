use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::KvStorage;
use crate::errors::ServiceError;

/// In-process storage. Nothing survives a restart; used by tests and by the
/// `memory` backend. Writes can be made to fail to exercise error paths.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<HashMap<String, Value>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    /// While set, every write returns `ServiceError::Storage` and changes nothing.
    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl KvStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        let map = self.inner.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), ServiceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("simulated write failure".into()));
        }
        let mut map = self.inner.write().await;
        map.extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn failing_writes_change_nothing() -> Result<(), anyhow::Error> {
        let storage = MemoryStorage::new();
        storage.set("k", json!([1])).await?;

        storage.fail_writes(true);
        let res = storage.set_many(vec![("k".into(), json!([2])), ("j".into(), json!([]))]).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        assert_eq!(storage.get("k").await?, Some(json!([1])));
        assert!(storage.get("j").await?.is_none());

        storage.fail_writes(false);
        storage.set("k", json!([3])).await?;
        assert_eq!(storage.get("k").await?, Some(json!([3])));
        Ok(())
    }
}
