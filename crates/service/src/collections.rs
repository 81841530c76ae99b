use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use crate::errors::ServiceError;
use crate::ids::IdGenerator;
use crate::storage::KvStorage;

/// Typed access to the record collections kept in a `KvStorage`.
///
/// Holds the id generator and the write lock shared by all stores: every
/// read-modify-write cycle runs under `lock()`, so only one writer is active
/// at a time.
pub struct Collections {
    storage: Arc<dyn KvStorage>,
    ids: IdGenerator,
    write_lock: Mutex<()>,
}

impl Collections {
    pub fn new(storage: Arc<dyn KvStorage>) -> Arc<Self> {
        Arc::new(Self { storage, ids: IdGenerator::new(), write_lock: Mutex::new(()) })
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Load a collection; a key that was never written is an empty collection.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, ServiceError> {
        match self.storage.get(key).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    pub async fn commit(&self, batch: Batch) -> Result<(), ServiceError> {
        self.storage.set_many(batch.entries).await
    }

    pub fn next_id(&self, taken: impl Fn(i64) -> bool) -> i64 {
        self.ids.next_unused(taken)
    }
}

/// Collections to be written together in one commit.
#[derive(Default)]
pub struct Batch {
    entries: Vec<(String, Value)>,
}

impl Batch {
    pub fn new() -> Self { Self::default() }

    pub fn put<T: Serialize>(mut self, key: &str, records: &[T]) -> Result<Self, ServiceError> {
        self.entries.push((key.to_string(), serde_json::to_value(records)?));
        Ok(self)
    }
}
