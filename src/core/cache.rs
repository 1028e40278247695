use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// How long a cached value stays fresh. Handed to the backend untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheTtl {
    /// Whatever the backend does by default.
    #[default]
    Default,
    /// Expire after a relative duration.
    After(Duration),
    /// Expire at a fixed point in time.
    At(DateTime<Utc>),
}

impl CacheTtl {
    /// Absolute expiry for an entry written now, using `fallback` for [`CacheTtl::Default`].
    pub fn expires_at(&self, fallback: Option<Duration>) -> Option<DateTime<Utc>> {
        let after = |duration: Duration| {
            chrono::Duration::from_std(duration)
                .ok()
                .and_then(|delta| Utc::now().checked_add_signed(delta))
        };
        match self {
            CacheTtl::Default => fallback.and_then(after),
            CacheTtl::After(duration) => after(*duration),
            CacheTtl::At(instant) => Some(*instant),
        }
    }
}

#[async_trait]
pub trait Cache<K, V>: Send + Sync {
    async fn get(&self, key: &K) -> Result<Option<V>, CacheError>;
    async fn put(&self, key: K, value: V, ttl: CacheTtl) -> Result<(), CacheError>;
    async fn remove(&self, key: &K) -> Result<(), CacheError>;
}

/// A cache that may or may not be present, decided once at construction.
pub enum CacheHandle<K, V> {
    NoCache,
    Cached(Arc<dyn Cache<K, V>>),
}

impl<K, V> CacheHandle<K, V> {
    pub fn cached(cache: Arc<dyn Cache<K, V>>) -> Self {
        CacheHandle::Cached(cache)
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, CacheHandle::Cached(_))
    }
}

impl<K, V> Clone for CacheHandle<K, V> {
    fn clone(&self) -> Self {
        match self {
            CacheHandle::NoCache => CacheHandle::NoCache,
            CacheHandle::Cached(cache) => CacheHandle::Cached(Arc::clone(cache)),
        }
    }
}

impl<K, V> Default for CacheHandle<K, V> {
    fn default() -> Self {
        CacheHandle::NoCache
    }
}
