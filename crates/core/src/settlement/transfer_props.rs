//! Property-based tests for transfer planning.
//!
//! - Every transfer is strictly positive
//! - At most `debtors + creditors - 1` transfers
//! - Paying the plan settles every balance
//! - Money only flows from debtors to creditors

use divvy_shared::types::MinorUnits;
use proptest::prelude::*;

use super::transfer::{SETTLED_THRESHOLD, apply_transfers, is_settled, minimal_transfers};
use super::types::Balance;

/// Strategy to generate zero-sum balances in whole hundreds of minor units.
///
/// Whole hundreds never leave a one-unit remainder mid-netting, so the
/// plan is expected to settle exactly.
fn zero_sum_balances() -> impl Strategy<Value = Vec<Balance>> {
    prop::collection::vec(-100_000i64..100_000, 1..12).prop_map(|units| {
        let mut amounts: Vec<i64> = units.iter().map(|u| u * 100).collect();
        amounts.push(-amounts.iter().sum::<i64>());
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| Balance::new(format!("p{i}"), MinorUnits(amount)))
            .collect()
    })
}

/// Strategy to generate arbitrary balances, not necessarily zero-sum.
fn any_balances() -> impl Strategy<Value = Vec<Balance>> {
    prop::collection::vec(-10_000_000i64..10_000_000, 0..16).prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| Balance::new(format!("p{i}"), MinorUnits(amount)))
            .collect()
    })
}

fn side_counts(balances: &[Balance]) -> (usize, usize) {
    let debtors = balances.iter().filter(|b| b.amount < -SETTLED_THRESHOLD).count();
    let creditors = balances.iter().filter(|b| b.amount > SETTLED_THRESHOLD).count();
    (debtors, creditors)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every emitted transfer moves a positive amount.
    #[test]
    fn prop_transfers_are_positive(balances in any_balances()) {
        for transfer in minimal_transfers(&balances) {
            prop_assert!(transfer.amount.is_positive(), "non-positive transfer {:?}", transfer);
        }
    }

    /// The plan never needs more than `debtors + creditors - 1` transfers.
    #[test]
    fn prop_transfer_count_bounded(balances in any_balances()) {
        let (debtors, creditors) = side_counts(&balances);
        let transfers = minimal_transfers(&balances);
        prop_assert!(
            transfers.len() <= (debtors + creditors).saturating_sub(1),
            "{} transfers for {} debtors and {} creditors",
            transfers.len(), debtors, creditors
        );
    }

    /// Paying every transfer settles a zero-sum ledger.
    #[test]
    fn prop_round_trip_settles(balances in zero_sum_balances()) {
        let after = apply_transfers(&balances, &minimal_transfers(&balances));
        prop_assert!(is_settled(&after), "unsettled after plan: {:?}", after);
    }

    /// Payers owed money never pay; participants who owe never receive.
    #[test]
    fn prop_flow_direction(balances in any_balances()) {
        for transfer in minimal_transfers(&balances) {
            let from = balances.iter().find(|b| b.participant_id == transfer.from).unwrap();
            let to = balances.iter().find(|b| b.participant_id == transfer.to).unwrap();
            prop_assert!(from.amount < -SETTLED_THRESHOLD);
            prop_assert!(to.amount > SETTLED_THRESHOLD);
        }
    }

    /// Nobody pays more than they owe or receives more than they are owed.
    #[test]
    fn prop_no_overshoot(balances in any_balances()) {
        let after = apply_transfers(&balances, &minimal_transfers(&balances));
        for (before, after) in balances.iter().zip(&after) {
            if before.amount.is_negative() {
                prop_assert!(after.amount <= MinorUnits::ZERO && after.amount >= before.amount);
            } else {
                prop_assert!(after.amount >= MinorUnits::ZERO && after.amount <= before.amount);
            }
        }
    }
}
