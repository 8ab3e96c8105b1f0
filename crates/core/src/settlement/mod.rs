//! Multi-party expense settlement.
//!
//! This module turns a ledger of shared expenses into:
//! - One net balance per participant in a single settlement currency
//! - A short list of transfers that brings every balance to zero
//!
//! Every function is pure: accumulators are local to the call and nothing
//! is cached between calls, so ledgers can be settled from any thread.

pub mod balance;
pub mod error;
pub mod plan;
pub mod transfer;
pub mod types;

#[cfg(test)]
mod transfer_props;

pub use balance::{compute_balances, net_total};
pub use error::SettlementError;
pub use plan::{settle, settle_batch};
pub use transfer::{SETTLED_THRESHOLD, apply_transfers, is_settled, minimal_transfers};
pub use types::{
    Balance, Expense, LedgerInput, SPLIT_RATIO_TOLERANCE, SettlementPlan, Split, Transfer,
};
