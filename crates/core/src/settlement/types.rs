//! Settlement domain types.
//!
//! Everything here is a plain value: built fresh for each call, never
//! mutated by the engine, and never persisted by it.

use chrono::{DateTime, NaiveDate, Utc};
use divvy_shared::types::{CurrencyCode, ExpenseId, MinorUnits, ParticipantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::SettlementError;
use crate::currency::FxRate;

/// Allowed deviation of an expense's summed share ratios from exactly 1.
pub const SPLIT_RATIO_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// One participant's portion of an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// The participant who owes this portion.
    pub participant_id: ParticipantId,
    /// Fraction of the expense attributed to the participant, in `[0, 1]`.
    pub share_ratio: Decimal,
}

impl Split {
    /// Creates a new split.
    #[must_use]
    pub fn new(participant_id: impl Into<ParticipantId>, share_ratio: Decimal) -> Self {
        Self {
            participant_id: participant_id.into(),
            share_ratio,
        }
    }
}

/// An expense fronted by one participant and shared among several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Identity used when reporting a problem with this expense.
    #[serde(default)]
    pub id: ExpenseId,
    /// The participant who paid.
    pub payer_id: ParticipantId,
    /// Total cost in `currency` minor units (expected to be non-negative).
    pub amount: MinorUnits,
    /// Currency the expense was paid in.
    pub currency: CurrencyCode,
    /// When the expense happened. Only the UTC calendar date matters.
    pub timestamp: DateTime<Utc>,
    /// Who shares the cost, and how much of it.
    pub splits: Vec<Split>,
}

impl Expense {
    /// Creates a new expense with a fresh ID.
    #[must_use]
    pub fn new(
        payer_id: impl Into<ParticipantId>,
        amount: MinorUnits,
        currency: impl Into<CurrencyCode>,
        timestamp: DateTime<Utc>,
        splits: Vec<Split>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            payer_id: payer_id.into(),
            amount,
            currency: currency.into(),
            timestamp,
            splits,
        }
    }

    /// Creates an expense shared equally among `participants`.
    ///
    /// Each share is `1/n`; for counts like 3 the ratios sum to slightly
    /// under 1, well inside [`SPLIT_RATIO_TOLERANCE`].
    #[must_use]
    pub fn split_equally<P>(
        payer_id: impl Into<ParticipantId>,
        amount: MinorUnits,
        currency: impl Into<CurrencyCode>,
        timestamp: DateTime<Utc>,
        participants: impl IntoIterator<Item = P>,
    ) -> Self
    where
        P: Into<ParticipantId>,
    {
        let participants: Vec<ParticipantId> = participants.into_iter().map(Into::into).collect();
        let splits = if participants.is_empty() {
            Vec::new()
        } else {
            let share_ratio = Decimal::ONE / Decimal::from(participants.len());
            participants
                .into_iter()
                .map(|participant_id| Split {
                    participant_id,
                    share_ratio,
                })
                .collect()
        };

        Self::new(payer_id, amount, currency, timestamp, splits)
    }

    /// Returns the calendar date used for exchange rate lookup.
    #[must_use]
    pub fn rate_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Returns the sum of all share ratios.
    #[must_use]
    pub fn ratio_sum(&self) -> Decimal {
        self.splits.iter().map(|s| s.share_ratio).sum()
    }

    /// Validates that the share ratios sum to 1 within tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`SettlementError::SplitRatio`] naming this expense otherwise.
    pub fn validate_splits(&self) -> Result<(), SettlementError> {
        let ratio_sum = self.ratio_sum();
        if (ratio_sum - Decimal::ONE).abs() > SPLIT_RATIO_TOLERANCE {
            return Err(SettlementError::SplitRatio {
                expense_id: self.id,
                ratio_sum,
            });
        }
        Ok(())
    }
}

/// A participant's net position in the settlement currency.
///
/// Positive means the group owes the participant; negative means the
/// participant owes the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// The participant.
    pub participant_id: ParticipantId,
    /// Signed net amount in settlement-currency minor units.
    pub amount: MinorUnits,
}

impl Balance {
    /// Creates a new balance.
    #[must_use]
    pub fn new(participant_id: impl Into<ParticipantId>, amount: MinorUnits) -> Self {
        Self {
            participant_id: participant_id.into(),
            amount,
        }
    }
}

/// A payment from a debtor to a creditor that reduces both positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// The participant paying.
    pub from: ParticipantId,
    /// The participant being paid.
    pub to: ParticipantId,
    /// Amount in settlement-currency minor units (always positive).
    pub amount: MinorUnits,
}

/// Everything needed to settle one group's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerInput {
    /// Currency the balances are expressed in.
    pub settlement_currency: CurrencyCode,
    /// The group's expenses.
    pub expenses: Vec<Expense>,
    /// Observed exchange rates covering the expenses' dates.
    #[serde(default)]
    pub rates: Vec<FxRate>,
}

/// Net balances and the transfers that settle them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Currency every amount in the plan is expressed in.
    pub settlement_currency: CurrencyCode,
    /// One balance per participant in the ledger.
    pub balances: Vec<Balance>,
    /// Transfers that bring every balance within the settled threshold.
    pub transfers: Vec<Transfer>,
}
