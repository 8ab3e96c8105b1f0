//! Expense settlement engine for Divvy.
//!
//! This crate contains pure settlement logic with ZERO I/O dependencies.
//! Callers supply expenses and exchange rates; the engine returns balances
//! and transfers and keeps no state between calls.
//!
//! # Modules
//!
//! - `currency` - Exchange rate resolution and minor-unit conversion
//! - `settlement` - Net balances and debt-netting transfer plans

pub mod currency;
pub mod settlement;

pub use currency::{FxRate, RateError, resolve_rate};
pub use settlement::{
    Balance, Expense, SettlementError, SettlementPlan, Split, Transfer, compute_balances,
    minimal_transfers, settle,
};
