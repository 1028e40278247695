pub mod disk;
pub mod memory;

use crate::core::cache::CacheHandle;
use crate::core::config::{AppConfig, CacheBackend};
use crate::core::rates::RateTable;
use anyhow::{Context, Result};
use disk::DiskCache;
use memory::MemoryCache;
use std::sync::Arc;
use tracing::debug;

const RATES_PARTITION: &str = "rates";

/// Opens the rate table cache selected by the configuration.
pub fn open_rate_cache(config: &AppConfig) -> Result<CacheHandle<String, RateTable>> {
    debug!(backend = ?config.cache.backend, "Opening rate cache");
    let handle = match config.cache.backend {
        CacheBackend::Disabled => CacheHandle::NoCache,
        CacheBackend::Memory => CacheHandle::cached(Arc::new(MemoryCache::new())),
        CacheBackend::Disk => {
            let path = config.default_data_path()?.join("cache");
            let cache = DiskCache::open(&path, RATES_PARTITION)
                .with_context(|| format!("Failed to open rate cache at {}", path.display()))?;
            CacheHandle::cached(Arc::new(cache))
        }
    };
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::CacheTtl;
    use tempfile::tempdir;

    #[test]
    fn test_disabled_cache() {
        let mut config = AppConfig::default();
        config.cache.backend = CacheBackend::Disabled;

        assert!(!open_rate_cache(&config).unwrap().is_enabled());
    }

    #[tokio::test]
    async fn test_disk_cache_under_data_path() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.data_path = Some(dir.path().to_string_lossy().into_owned());

        let handle = open_rate_cache(&config).unwrap();
        let CacheHandle::Cached(cache) = handle else {
            panic!("expected a cache");
        };
        cache
            .put("k".to_string(), RateTable::with_base("EUR"), CacheTtl::Default)
            .await
            .unwrap();
        assert!(cache.get(&"k".to_string()).await.unwrap().is_some());
        assert!(dir.path().join("cache").exists());
    }
}
