use crate::core::cache::{Cache, CacheError, CacheTtl};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize, Deserialize)]
struct CacheEntry<V> {
    value: V,
    expires_at: Option<DateTime<Utc>>,
}

impl From<fjall::Error> for CacheError {
    fn from(e: fjall::Error) -> Self {
        CacheError::Backend(e.to_string())
    }
}

/// Persistent cache stored in a `fjall` partition, one JSON document per key.
pub struct DiskCache<K, V> {
    keyspace: Keyspace,
    partition: PartitionHandle,
    default_ttl: Option<Duration>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> DiskCache<K, V> {
    pub fn open(path: &Path, partition: &str) -> Result<Self, CacheError> {
        std::fs::create_dir_all(path)?;

        let keyspace = Config::new(path).open()?;
        let partition = keyspace.open_partition(partition, PartitionCreateOptions::default())?;
        debug!("Opened disk cache at {}", path.display());
        Ok(Self {
            keyspace,
            partition,
            default_ttl: None,
            _marker: PhantomData,
        })
    }

    pub fn with_default_ttl(mut self, default_ttl: Option<Duration>) -> Self {
        self.default_ttl = default_ttl;
        self
    }
}

#[async_trait]
impl<K, V> Cache<K, V> for DiskCache<K, V>
where
    K: Serialize + Send + Sync + Debug + 'static,
    V: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, CacheError> {
        let raw_key = serde_json::to_vec(key)?;
        let Some(raw) = self.partition.get(&raw_key)? else {
            debug!("Cache MISS for key: {:?}", key);
            return Ok(None);
        };

        let entry: CacheEntry<V> = serde_json::from_slice(&raw)?;
        if let Some(expires_at) = entry.expires_at {
            if expires_at <= Utc::now() {
                debug!("Cache entry expired for key: {:?}", key);
                self.partition.remove(raw_key)?;
                return Ok(None);
            }
        }
        debug!("Cache HIT for key: {:?}", key);
        Ok(Some(entry.value))
    }

    async fn put(&self, key: K, value: V, ttl: CacheTtl) -> Result<(), CacheError> {
        let entry = CacheEntry {
            value,
            expires_at: ttl.expires_at(self.default_ttl),
        };
        self.partition
            .insert(serde_json::to_vec(&key)?, serde_json::to_vec(&entry)?)?;
        self.keyspace.persist(PersistMode::Buffer)?;
        debug!("Cache PUT for key: {:?}", key);
        Ok(())
    }

    async fn remove(&self, key: &K) -> Result<(), CacheError> {
        self.partition.remove(serde_json::to_vec(key)?)?;
        debug!("Cache REMOVE for key: {:?}", key);
        Ok(())
    }
}
