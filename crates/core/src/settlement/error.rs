//! Settlement error types.
//!
//! Every variant is terminal for the call that raised it: a ledger is
//! settled completely or not at all.

use divvy_shared::AppError;
use divvy_shared::types::ExpenseId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::currency::RateError;

/// Errors that can occur while computing balances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// An expense's rate could not be resolved.
    #[error(transparent)]
    Rate(#[from] RateError),

    /// An expense's share ratios do not sum to 1 within tolerance.
    #[error("Split ratios of expense {expense_id} sum to {ratio_sum}, expected 1")]
    SplitRatio {
        /// The offending expense.
        expense_id: ExpenseId,
        /// The actual sum of its share ratios.
        ratio_sum: Decimal,
    },

    /// A converted amount or a running balance does not fit in 64-bit
    /// minor units.
    #[error("Amounts of expense {expense_id} are out of range")]
    AmountOverflow {
        /// The offending expense.
        expense_id: ExpenseId,
    },
}

impl SettlementError {
    /// Returns the error code for reporting.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Rate(err) => err.error_code(),
            Self::SplitRatio { .. } => "SPLIT_RATIO",
            Self::AmountOverflow { .. } => "AMOUNT_OVERFLOW",
        }
    }

    /// Returns true if the caller can backfill data and retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rate(err) => err.is_retryable(),
            Self::SplitRatio { .. } | Self::AmountOverflow { .. } => false,
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        let message = err.to_string();
        match err {
            SettlementError::Rate(RateError::MissingRate { .. }) => Self::NotFound(message),
            SettlementError::Rate(RateError::NonInvertibleRate { .. })
            | SettlementError::SplitRatio { .. } => Self::Validation(message),
            SettlementError::AmountOverflow { .. } => Self::BusinessRule(message),
        }
    }
}
