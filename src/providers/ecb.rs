use super::feed::parse_feed;
use crate::core::{
    cache::{CacheHandle, CacheTtl},
    config::ECB_DAILY_FEED_URI,
    currency::CurrencyRateProvider,
    error::{RateError, RateResult},
    fetch::{FeedRequest, Fetcher},
    rates::RateTable,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Suffix of the cache key the rate table is stored under.
pub const RATES_CACHE_SUFFIX: &str = "rates";

#[derive(Debug, Clone)]
pub struct EcbProviderConfig {
    pub feed_uri: String,
    pub cache_prefix: String,
    pub ttl: CacheTtl,
}

impl EcbProviderConfig {
    pub fn default_cache_prefix() -> String {
        std::any::type_name::<EcbRateProvider>().to_string()
    }
}

impl Default for EcbProviderConfig {
    fn default() -> Self {
        EcbProviderConfig {
            feed_uri: ECB_DAILY_FEED_URI.to_string(),
            cache_prefix: Self::default_cache_prefix(),
            ttl: CacheTtl::Default,
        }
    }
}

/// Resolves EUR based reference rates from the ECB daily feed.
///
/// The parsed table is cached under [`EcbRateProvider::cache_key`] when a cache
/// is configured. Concurrent cold lookups are not coalesced; each may fetch the
/// feed and overwrite the cached table.
pub struct EcbRateProvider {
    fetcher: Arc<dyn Fetcher>,
    cache: CacheHandle<String, RateTable>,
    config: EcbProviderConfig,
}

impl EcbRateProvider {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        cache: CacheHandle<String, RateTable>,
        config: EcbProviderConfig,
    ) -> Self {
        Self {
            fetcher,
            cache,
            config,
        }
    }

    pub fn feed_uri(&self) -> &str {
        &self.config.feed_uri
    }

    pub fn ttl(&self) -> CacheTtl {
        self.config.ttl
    }

    pub fn cache_prefix(&self) -> &str {
        &self.config.cache_prefix
    }

    /// Changes the prefix of every key computed from now on.
    ///
    /// Entries stored under the previous prefix are left in the cache.
    pub fn set_cache_prefix(&mut self, prefix: impl Into<String>) {
        self.config.cache_prefix = prefix.into();
    }

    pub fn cache_key(&self, suffix: &str) -> String {
        format!("{}/{}", self.config.cache_prefix, suffix)
    }

    /// Looks up how many units of `target` one unit of `source` buys.
    pub async fn resolve(&self, source: &str, target: &str) -> RateResult<Decimal> {
        let table = self.rate_table().await?;
        table.rate(source, target)
    }

    /// Returns the cached rate table, fetching and caching the feed on a miss.
    pub async fn rate_table(&self) -> RateResult<RateTable> {
        let key = self.cache_key(RATES_CACHE_SUFFIX);

        if let CacheHandle::Cached(cache) = &self.cache {
            if let Some(table) = cache.get(&key).await? {
                return Ok(table);
            }
        }

        let table = self.fetch_live_table().await?;

        if let CacheHandle::Cached(cache) = &self.cache {
            debug!(key = %key, ttl = ?self.config.ttl, "Caching rate table");
            cache.put(key, table.clone(), self.config.ttl).await?;
        }

        Ok(table)
    }

    /// Downloads and parses the feed, bypassing the cache.
    #[instrument(name = "EcbFeedFetch", skip(self), fields(uri = %self.config.feed_uri))]
    pub async fn fetch_live_table(&self) -> RateResult<RateTable> {
        let request = FeedRequest::get(&self.config.feed_uri);
        let response = self
            .fetcher
            .send(&request)
            .await
            .map_err(RateError::unavailable)?;

        if !response.status.is_success() {
            return Err(RateError::unavailable(format!(
                "HTTP {}",
                response.status.as_u16()
            )));
        }

        parse_feed(&response.body)
    }

    /// Drops the cached rate table so the next lookup fetches the feed.
    pub async fn clear_cached_rates(&self) -> RateResult<()> {
        if let CacheHandle::Cached(cache) = &self.cache {
            cache.remove(&self.cache_key(RATES_CACHE_SUFFIX)).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CurrencyRateProvider for EcbRateProvider {
    async fn get_rate(&self, from: &str, to: &str) -> RateResult<Decimal> {
        self.resolve(from, to).await
    }
}
