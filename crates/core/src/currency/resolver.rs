//! Exchange rate resolution against a flat table of observed rates.
//!
//! Lookups are exact-date only. A rate observed on any other day is never
//! substituted for the requested one.

use chrono::NaiveDate;
use divvy_shared::types::CurrencyCode;
use rust_decimal::Decimal;

use super::error::RateError;
use super::exchange::FxRate;

/// Resolves the rate converting `from` into `to` as of `as_of`.
///
/// Resolution order:
/// 1. `from == to` returns `1` without consulting the table
/// 2. The first entry quoting `from` → `to` on `as_of`
/// 3. The first entry quoting `to` → `from` on `as_of`, inverted
///
/// # Errors
///
/// Returns [`RateError::MissingRate`] when neither a direct nor an inverse
/// entry exists for that date, and [`RateError::NonInvertibleRate`] when the
/// only match is an inverse entry with a zero rate.
pub fn resolve_rate(
    rates: &[FxRate],
    from: &CurrencyCode,
    to: &CurrencyCode,
    as_of: NaiveDate,
) -> Result<Decimal, RateError> {
    if from == to {
        return Ok(Decimal::ONE);
    }

    if let Some(direct) = rates.iter().find(|r| r.matches(from, to, as_of)) {
        return Ok(direct.rate);
    }

    if let Some(reverse) = rates.iter().find(|r| r.matches(to, from, as_of)) {
        return reverse
            .inverse()
            .map(|inverse| inverse.rate)
            .ok_or_else(|| RateError::NonInvertibleRate {
                base: reverse.base.clone(),
                quote: reverse.quote.clone(),
                as_of,
            });
    }

    Err(RateError::MissingRate {
        from: from.clone(),
        to: to.clone(),
        as_of,
    })
}
