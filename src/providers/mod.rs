pub mod ecb;
pub mod feed;
pub mod http;

pub use ecb::{EcbProviderConfig, EcbRateProvider};
pub use http::HttpFetcher;
