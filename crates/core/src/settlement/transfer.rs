//! Greedy debt netting.
//!
//! Pairs the largest remaining debtor with the largest remaining creditor
//! until one side runs out. This bounds the transfer count by
//! `debtors + creditors - 1` but does not search for the true minimum.

use std::collections::BTreeMap;

use divvy_shared::types::{MinorUnits, ParticipantId};
use tracing::debug;

use super::types::{Balance, Transfer};

/// Balances within this many minor units of zero count as settled.
pub const SETTLED_THRESHOLD: MinorUnits = MinorUnits(1);

/// A participant's outstanding magnitude while netting.
struct Position<'a> {
    participant_id: &'a ParticipantId,
    remaining: MinorUnits,
}

/// Plans the transfers that settle `balances`.
///
/// Participants already within [`SETTLED_THRESHOLD`] of zero never appear.
/// Every emitted transfer has a strictly positive amount.
#[must_use]
pub fn minimal_transfers(balances: &[Balance]) -> Vec<Transfer> {
    let mut debtors: Vec<Position<'_>> = balances
        .iter()
        .filter(|b| b.amount < -SETTLED_THRESHOLD)
        .map(|b| Position {
            participant_id: &b.participant_id,
            remaining: -b.amount,
        })
        .collect();
    let mut creditors: Vec<Position<'_>> = balances
        .iter()
        .filter(|b| b.amount > SETTLED_THRESHOLD)
        .map(|b| Position {
            participant_id: &b.participant_id,
            remaining: b.amount,
        })
        .collect();

    // Stable: equal magnitudes keep their input order.
    debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
    let (mut d, mut c) = (0, 0);

    while d < debtors.len() && c < creditors.len() {
        let debtor = &mut debtors[d];
        let creditor = &mut creditors[c];
        let amount = debtor.remaining.min(creditor.remaining);

        if amount.is_positive() {
            transfers.push(Transfer {
                from: debtor.participant_id.clone(),
                to: creditor.participant_id.clone(),
                amount,
            });
        }

        debtor.remaining -= amount;
        creditor.remaining -= amount;

        if debtor.remaining <= SETTLED_THRESHOLD {
            d += 1;
        }
        if creditor.remaining <= SETTLED_THRESHOLD {
            c += 1;
        }
    }

    debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        transfers = transfers.len(),
        "Planned transfers"
    );

    transfers
}

/// Returns the balances that remain after every transfer is paid.
///
/// Paying a transfer raises the payer's balance and lowers the payee's.
/// Participants named only in transfers are appended in first-seen order.
/// If a participant is listed twice, the first entry is adjusted.
#[must_use]
pub fn apply_transfers(balances: &[Balance], transfers: &[Transfer]) -> Vec<Balance> {
    let mut result = balances.to_vec();
    let mut index: BTreeMap<ParticipantId, usize> = BTreeMap::new();
    for (i, balance) in result.iter().enumerate() {
        index.entry(balance.participant_id.clone()).or_insert(i);
    }

    for transfer in transfers {
        *position_of(&mut result, &mut index, &transfer.from) += transfer.amount;
        *position_of(&mut result, &mut index, &transfer.to) -= transfer.amount;
    }

    result
}

fn position_of<'a>(
    balances: &'a mut Vec<Balance>,
    index: &mut BTreeMap<ParticipantId, usize>,
    participant_id: &ParticipantId,
) -> &'a mut MinorUnits {
    let i = *index.entry(participant_id.clone()).or_insert_with(|| {
        balances.push(Balance {
            participant_id: participant_id.clone(),
            amount: MinorUnits::ZERO,
        });
        balances.len() - 1
    });
    &mut balances[i].amount
}

/// Returns true if every balance is within [`SETTLED_THRESHOLD`] of zero.
#[must_use]
pub fn is_settled(balances: &[Balance]) -> bool {
    balances.iter().all(|b| b.amount.abs() <= SETTLED_THRESHOLD)
}
