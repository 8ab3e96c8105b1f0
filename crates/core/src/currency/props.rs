//! Property-based tests for currency operations.
//!
//! - Rate resolution is symmetric through inversion
//! - Missing dates never borrow a neighbouring day's rate
//! - Conversion rounds to whole minor units deterministically

use chrono::NaiveDate;
use divvy_shared::types::{CurrencyCode, MinorUnits};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{apportion, convert_to_minor};
use super::error::RateError;
use super::exchange::FxRate;
use super::resolver::resolve_rate;

/// Strategy to generate non-negative minor-unit amounts (0 to 100,000,000.00).
fn minor_amount() -> impl Strategy<Value = MinorUnits> {
    (0i64..10_000_000_000i64).prop_map(MinorUnits::new)
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate a share ratio in [0, 1] with 6 decimal places.
fn share_ratio() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

/// Strategy to generate a day in 2024.
fn day() -> impl Strategy<Value = NaiveDate> {
    (1u32..=366).prop_map(|ordinal| {
        NaiveDate::from_yo_opt(2024, ordinal).unwrap_or(NaiveDate::MIN)
    })
}

fn ccy(code: &str) -> CurrencyCode {
    CurrencyCode::from(code)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Resolving the reverse direction of a single entry yields its inverse.
    #[test]
    fn prop_inverse_lookup_is_reciprocal(
        rate in positive_rate(),
        as_of in day(),
    ) {
        let rates = vec![FxRate::new("EUR", "USD", rate, as_of)];

        let forward = resolve_rate(&rates, &ccy("EUR"), &ccy("USD"), as_of).unwrap();
        let backward = resolve_rate(&rates, &ccy("USD"), &ccy("EUR"), as_of).unwrap();

        prop_assert_eq!(forward, rate);
        prop_assert_eq!(backward, Decimal::ONE / rate);
    }

    /// A table quoting only one day never answers for another day.
    #[test]
    fn prop_other_dates_are_missing(
        rate in positive_rate(),
        quoted in day(),
        requested in day(),
    ) {
        prop_assume!(quoted != requested);
        let rates = vec![FxRate::new("EUR", "USD", rate, quoted)];

        let result = resolve_rate(&rates, &ccy("EUR"), &ccy("USD"), requested);
        prop_assert_eq!(
            result,
            Err(RateError::MissingRate { from: ccy("EUR"), to: ccy("USD"), as_of: requested })
        );
    }

    /// Identity lookups never fail, whatever the table holds.
    #[test]
    fn prop_identity_always_resolves(
        rate in positive_rate(),
        as_of in day(),
    ) {
        let rates = vec![FxRate::new("GBP", "GBP", rate, as_of)];
        prop_assert_eq!(resolve_rate(&rates, &ccy("GBP"), &ccy("GBP"), as_of), Ok(Decimal::ONE));
    }

    /// Conversion stays within half a minor unit of the exact product.
    #[test]
    fn prop_convert_within_half_unit(
        amount in minor_amount(),
        rate in positive_rate(),
    ) {
        let converted = convert_to_minor(amount, rate).unwrap();
        let exact = Decimal::from(amount.get()) * rate;
        let error = (Decimal::from(converted.get()) - exact).abs();
        prop_assert!(error <= Decimal::new(5, 1), "error {} exceeds 0.5", error);
    }

    /// Shares of a non-negative amount never exceed it and never go negative.
    #[test]
    fn prop_apportion_bounded(
        amount in minor_amount(),
        ratio in share_ratio(),
    ) {
        let share = apportion(amount, ratio).unwrap();
        prop_assert!(!share.is_negative());
        prop_assert!(share <= amount);
    }
}
