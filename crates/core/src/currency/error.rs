//! Exchange rate lookup errors.

use chrono::NaiveDate;
use divvy_shared::types::CurrencyCode;
use thiserror::Error;

/// Errors that can occur while resolving an exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// No direct or inverse rate exists for the currency pair on the given date.
    #[error("No exchange rate found for {from} to {to} on {as_of}")]
    MissingRate {
        /// Source currency code.
        from: CurrencyCode,
        /// Target currency code.
        to: CurrencyCode,
        /// Date for which the rate was requested.
        as_of: NaiveDate,
    },

    /// The only matching entry is an inverse quote of zero.
    #[error("Exchange rate {base} to {quote} on {as_of} is zero and cannot be inverted")]
    NonInvertibleRate {
        /// Base currency of the offending table entry.
        base: CurrencyCode,
        /// Quote currency of the offending table entry.
        quote: CurrencyCode,
        /// Date of the offending table entry.
        as_of: NaiveDate,
    },
}

impl RateError {
    /// Returns the error code for reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRate { .. } => "MISSING_RATE",
            Self::NonInvertibleRate { .. } => "NON_INVERTIBLE_RATE",
        }
    }

    /// Returns true if backfilling the rate table and retrying can succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MissingRate { .. })
    }
}
