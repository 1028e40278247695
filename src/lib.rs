pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

pub use crate::core::config;
pub use crate::core::{CurrencyRateProvider, RateError, RateTable};
pub use crate::providers::{EcbProviderConfig, EcbRateProvider};

use anyhow::Result;
use providers::http::HttpFetcher;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Rate {
        from: String,
        to: String,
        amount: Option<Decimal>,
    },
    Rates {
        base: String,
    },
    ClearCache,
}

/// Builds a provider wired to the HTTP fetcher and the configured cache.
pub fn build_provider(config: &config::AppConfig) -> Result<EcbRateProvider> {
    let fetcher = HttpFetcher::new()?;
    let cache = store::open_rate_cache(config)?;
    debug!(
        backend = ?config.cache.backend,
        enabled = cache.is_enabled(),
        "Opened rate cache"
    );

    let mut provider_config = EcbProviderConfig {
        feed_uri: config.ecb.feed_uri.clone(),
        ttl: config.cache.ttl(),
        ..EcbProviderConfig::default()
    };
    if let Some(prefix) = &config.cache.prefix {
        provider_config.cache_prefix = prefix.clone();
    }

    Ok(EcbRateProvider::new(Arc::new(fetcher), cache, provider_config))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("eurofx starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = build_provider(&config)?;

    match command {
        AppCommand::Rate { from, to, amount } => {
            cli::rate::show_rate(&provider, &from, &to, amount).await
        }
        AppCommand::Rates { base } => cli::rates::show_rates(&provider, &base).await,
        AppCommand::ClearCache => {
            provider.clear_cached_rates().await?;
            info!("Cleared cached rates");
            Ok(())
        }
    }
}
