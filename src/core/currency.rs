//! Currency conversion abstractions

use crate::core::error::RateResult;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Anything able to quote how many units of `to` one unit of `from` buys.
#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> RateResult<Decimal>;
}
