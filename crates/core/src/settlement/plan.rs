//! End-to-end settlement: balances, then transfers.

use divvy_shared::types::CurrencyCode;
use rayon::prelude::*;
use tracing::debug;

use super::balance::compute_balances;
use super::error::SettlementError;
use super::transfer::minimal_transfers;
use super::types::{Expense, LedgerInput, SettlementPlan};
use crate::currency::FxRate;

/// Computes balances for a ledger and the transfers that settle them.
///
/// # Errors
///
/// Propagates any [`SettlementError`] from the balance calculation.
pub fn settle(
    expenses: &[Expense],
    settlement_currency: &CurrencyCode,
    rates: &[FxRate],
) -> Result<SettlementPlan, SettlementError> {
    let balances = compute_balances(expenses, settlement_currency, rates)?;
    let transfers = minimal_transfers(&balances);

    debug!(
        currency = %settlement_currency,
        expenses = expenses.len(),
        participants = balances.len(),
        transfers = transfers.len(),
        "Settled ledger"
    );

    Ok(SettlementPlan {
        settlement_currency: settlement_currency.clone(),
        balances,
        transfers,
    })
}

/// Settles many independent ledgers in parallel.
///
/// Results are returned in input order. A failing ledger does not affect
/// the others.
#[must_use]
pub fn settle_batch(ledgers: &[LedgerInput]) -> Vec<Result<SettlementPlan, SettlementError>> {
    ledgers
        .par_iter()
        .map(|ledger| settle(&ledger.expenses, &ledger.settlement_currency, &ledger.rates))
        .collect()
}
