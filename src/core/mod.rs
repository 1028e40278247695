//! Core abstractions: rate tables, errors and the capabilities a provider is built from

pub mod cache;
pub mod config;
pub mod currency;
pub mod error;
pub mod fetch;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use cache::{Cache, CacheError, CacheHandle, CacheTtl};
pub use currency::CurrencyRateProvider;
pub use error::{RateError, RateResult};
pub use fetch::{FeedRequest, FeedResponse, Fetcher, TransportError};
pub use rates::RateTable;
