//! Rate table types

use crate::core::error::{RateError, RateResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exchange rates keyed by base currency, then by quote currency.
///
/// One unit of the base buys `rate` units of the quote. Every base always
/// quotes itself at exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RateTableRepr")]
pub struct RateTable {
    rates: BTreeMap<String, BTreeMap<String, Decimal>>,
    published: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct RateTableRepr {
    #[serde(default)]
    rates: BTreeMap<String, BTreeMap<String, Decimal>>,
    #[serde(default)]
    published: Option<NaiveDate>,
}

impl From<RateTableRepr> for RateTable {
    fn from(repr: RateTableRepr) -> Self {
        let mut table = RateTable {
            rates: BTreeMap::new(),
            published: repr.published,
        };
        for (base, quotes) in repr.rates {
            table.add_base(&base);
            for (quote, rate) in quotes {
                table.insert(&base, &quote, rate);
            }
        }
        table
    }
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding only `base -> base = 1`.
    pub fn with_base(base: &str) -> Self {
        let mut table = Self::new();
        table.add_base(base);
        table
    }

    pub fn add_base(&mut self, base: &str) {
        self.rates
            .entry(base.to_string())
            .or_default()
            .insert(base.to_string(), Decimal::ONE);
    }

    /// Records `base -> quote = rate`. The identity quote of a base is never overwritten.
    pub fn insert(&mut self, base: &str, quote: &str, rate: Decimal) {
        self.add_base(base);
        if base == quote {
            return;
        }
        if let Some(quotes) = self.rates.get_mut(base) {
            quotes.insert(quote.to_string(), rate);
        }
    }

    /// Looks up how many units of `target` one unit of `source` buys.
    pub fn rate(&self, source: &str, target: &str) -> RateResult<Decimal> {
        let quotes = self
            .rates
            .get(source)
            .ok_or_else(|| RateError::SourceRateUnavailable {
                source_currency: source.to_string(),
                target_currency: target.to_string(),
            })?;

        quotes
            .get(target)
            .copied()
            .ok_or_else(|| RateError::TargetRateUnavailable {
                source_currency: source.to_string(),
                target_currency: target.to_string(),
            })
    }

    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn quotes(&self, base: &str) -> Option<&BTreeMap<String, Decimal>> {
        self.rates.get(base)
    }

    pub fn published(&self) -> Option<NaiveDate> {
        self.published
    }

    pub fn set_published(&mut self, date: NaiveDate) {
        self.published = Some(date);
    }
}
