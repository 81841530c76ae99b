use std::{collections::HashMap, hash::Hash, io, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tracing::debug;

use super::KvStorage;
use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Persists a `HashMap<K, V>` to a single JSON file. Every mutation is applied
/// to a copy, written to a sibling temp file and renamed over the original;
/// the in-memory map is only replaced once the rename succeeded, so memory
/// and disk never disagree after a failed write.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

fn io_error(action: &str, path: &Path, e: io::Error) -> ServiceError {
    ServiceError::Storage(format!("{action} {}: {e}", path.display()))
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if
    /// missing; a file that exists but does not decode is an error.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| io_error("create dir", parent, e))?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                fs::write(&file_path, serde_json::to_vec(&empty)?)
                    .await
                    .map_err(|e| io_error("write", &file_path, e))?;
                empty
            }
            Err(e) => return Err(io_error("read", &file_path, e)),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    pub fn path(&self) -> &Path { &self.file_path }

    async fn save(&self, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(map)?;
        let mut tmp = self.file_path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, data).await.map_err(|e| io_error("write", &tmp, e))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| io_error("rename", &self.file_path, e))?;
        debug!(path = %self.file_path.display(), entries = map.len(), "store file written");
        Ok(())
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        self.update_map(|m| {
            m.insert(key, value);
            Ok(())
        })
        .await
    }

    /// Apply a mutation to the underlying map and persist atomically.
    pub async fn update_map<F>(&self, f: F) -> Result<(), ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<(), ServiceError>,
    {
        let mut map = self.inner.write().await;
        let mut next = map.clone();
        f(&mut next)?;
        self.save(&next).await?;
        *map = next;
        Ok(())
    }
}

#[async_trait]
impl KvStorage for JsonMapStore<String, Value> {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        Ok(JsonMapStore::get(self, &key.to_string()).await)
    }

    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), ServiceError> {
        self.update_map(|m| {
            m.extend(entries);
            Ok(())
        })
        .await
    }
}
