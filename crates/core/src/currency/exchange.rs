//! Exchange rate types and logic.

use chrono::NaiveDate;
use divvy_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An observed exchange rate between two currencies on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxRate {
    /// Base currency code.
    pub base: CurrencyCode,
    /// Quote currency code.
    pub quote: CurrencyCode,
    /// Exchange rate (1 base = rate quote).
    pub rate: Decimal,
    /// Date this rate was observed for.
    pub as_of: NaiveDate,
}

impl FxRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub fn new(
        base: impl Into<CurrencyCode>,
        quote: impl Into<CurrencyCode>,
        rate: Decimal,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            rate,
            as_of,
        }
    }

    /// Returns true if this entry quotes exactly `base` → `quote` on `as_of`.
    #[must_use]
    pub fn matches(&self, base: &CurrencyCode, quote: &CurrencyCode, as_of: NaiveDate) -> bool {
        self.as_of == as_of && self.base == *base && self.quote == *quote
    }

    /// Returns the inverse rate, or `None` if the rate is zero.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let rate = Decimal::ONE.checked_div(self.rate)?;
        Some(Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
            rate,
            as_of: self.as_of,
        })
    }
}
