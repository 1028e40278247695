//! Error types for rate resolution.

use crate::core::cache::CacheError;
use std::fmt::Display;
use thiserror::Error;

/// Errors that can occur while resolving an exchange rate.
#[derive(Debug, Error)]
pub enum RateError {
    /// The feed could not be fetched, or answered with a non-success status.
    #[error("Currency-rates not available at this time ({reason})")]
    RatesUnavailable { reason: String },

    /// The feed was fetched but its body is not a valid rate document.
    #[error("Failed to parse rate feed: {detail}")]
    FeedParse { detail: String },

    /// The source currency is not a base of the rate table.
    #[error("Source exchange rate not available ({source_currency} -> {target_currency})")]
    SourceRateUnavailable {
        source_currency: String,
        target_currency: String,
    },

    /// The source currency has no quote for the target currency.
    #[error("Target exchange rate not available ({source_currency} -> {target_currency})")]
    TargetRateUnavailable {
        source_currency: String,
        target_currency: String,
    },

    /// The cache backend failed on read or write.
    #[error("Rate cache failure: {0}")]
    Cache(#[from] CacheError),
}

impl RateError {
    pub fn unavailable(reason: impl Display) -> Self {
        RateError::RatesUnavailable {
            reason: reason.to_string(),
        }
    }

    pub fn feed_parse(detail: impl Display) -> Self {
        RateError::FeedParse {
            detail: detail.to_string(),
        }
    }

    /// Whether the failure came from fetching rather than from the data itself.
    pub fn is_transient(&self) -> bool {
        matches!(self, RateError::RatesUnavailable { .. })
    }
}

/// Result type for rate operations.
pub type RateResult<T> = Result<T, RateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RateError::unavailable("HTTP 404").to_string(),
            "Currency-rates not available at this time (HTTP 404)"
        );
        let err = RateError::SourceRateUnavailable {
            source_currency: "USD".to_string(),
            target_currency: "EUR".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Source exchange rate not available (USD -> EUR)"
        );
    }

    #[test]
    fn test_only_fetch_failures_are_transient() {
        assert!(RateError::unavailable("timeout").is_transient());
        assert!(!RateError::feed_parse("unexpected end").is_transient());
        assert!(!RateError::from(CacheError::Backend("down".to_string())).is_transient());
    }
}
