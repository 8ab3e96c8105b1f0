//! Net balance calculation across a multi-currency expense ledger.

use std::collections::BTreeMap;

use divvy_shared::types::{CurrencyCode, MinorUnits, ParticipantId};
use tracing::debug;

use super::error::SettlementError;
use super::types::{Balance, Expense};
use crate::currency::{FxRate, apportion, convert_to_minor, resolve_rate};

/// Computes every participant's net balance in `settlement_currency`.
///
/// For each expense, in order:
/// 1. Resolve the rate for the expense's UTC date
/// 2. Convert the whole amount once, rounding to a minor unit
/// 3. Validate that the share ratios sum to 1
/// 4. Credit the payer with the converted amount
/// 5. Debit each split participant their independently rounded share
///
/// Independent rounding can leave up to `splits - 1` minor units per
/// expense unaccounted for. That residual is kept, not redistributed.
///
/// Participants are returned in ascending ID order; callers should not
/// depend on it.
///
/// # Errors
///
/// Returns the first [`SettlementError`] encountered. No balances are
/// returned when any expense fails. Conversion, apportioning, and the
/// running per-participant totals are all checked; leaving the `i64`
/// range is reported as [`SettlementError::AmountOverflow`].
pub fn compute_balances(
    expenses: &[Expense],
    settlement_currency: &CurrencyCode,
    rates: &[FxRate],
) -> Result<Vec<Balance>, SettlementError> {
    let mut ledger: BTreeMap<ParticipantId, MinorUnits> = BTreeMap::new();

    for expense in expenses {
        post_expense(&mut ledger, expense, settlement_currency, rates)?;
    }

    Ok(ledger
        .into_iter()
        .map(|(participant_id, amount)| Balance {
            participant_id,
            amount,
        })
        .collect())
}

/// Applies one expense to the running ledger.
fn post_expense(
    ledger: &mut BTreeMap<ParticipantId, MinorUnits>,
    expense: &Expense,
    settlement_currency: &CurrencyCode,
    rates: &[FxRate],
) -> Result<(), SettlementError> {
    let overflow = || SettlementError::AmountOverflow {
        expense_id: expense.id,
    };

    let rate = resolve_rate(rates, &expense.currency, settlement_currency, expense.rate_date())?;
    let settled = convert_to_minor(expense.amount, rate).ok_or_else(overflow)?;

    expense.validate_splits()?;

    let payer = ledger.entry(expense.payer_id.clone()).or_default();
    *payer = bounded(payer.checked_add(settled)).ok_or_else(overflow)?;

    let mut debited = MinorUnits::ZERO;
    for split in &expense.splits {
        let share = apportion(settled, split.share_ratio).ok_or_else(overflow)?;
        let member = ledger.entry(split.participant_id.clone()).or_default();
        *member = bounded(member.checked_sub(share)).ok_or_else(overflow)?;
        debited = debited.checked_add(share).ok_or_else(overflow)?;
    }
    let drift = settled.checked_sub(debited).ok_or_else(overflow)?;

    debug!(
        expense_id = %expense.id,
        currency = %expense.currency,
        %rate,
        settled = settled.get(),
        drift = drift.get(),
        "Posted expense"
    );

    Ok(())
}

/// Rejects `i64::MIN` so every balance can be negated by the planner.
fn bounded(amount: Option<MinorUnits>) -> Option<MinorUnits> {
    amount.filter(|a| a.get() != i64::MIN)
}

/// Returns the signed sum of all balances.
///
/// Zero for a perfectly balanced ledger; otherwise the accumulated
/// per-split rounding drift.
#[must_use]
pub fn net_total(balances: &[Balance]) -> MinorUnits {
    balances.iter().map(|b| b.amount).sum()
}
