// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Split realized campaign funds across beneficiary NGOs.
//!
//! Each share is rounded independently with the campaign's rounding mode,
//! then the largest share absorbs the residual so the payouts always sum to
//! exactly the total. Conservation of value holds for any total ≥ 0.

use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::models::{NgoAllocation, NgoPayout, RoundingMode};

/// Check that a candidate allocation set is well formed and sums to 100.
pub fn validate_shares(shares: &[NgoAllocation]) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    let mut sum = Decimal::ZERO;

    for share in shares {
        if !seen.insert(share.ngo_id) {
            return Err(ValidationError::DuplicateNgo(share.ngo_id));
        }
        if share.pct < Decimal::ZERO || share.pct > Decimal::ONE_HUNDRED {
            return Err(ValidationError::InvalidShare {
                ngo_id: share.ngo_id,
                pct: share.pct,
            });
        }
        sum += share.pct;
    }

    if sum != Decimal::ONE_HUNDRED {
        return Err(ValidationError::AllocationSum {
            actual: sum.normalize(),
        });
    }
    Ok(())
}

/// Allocate `total_funds` across NGOs. Payouts keep the input order.
pub fn allocate(
    total_funds: Decimal,
    shares: &[NgoAllocation],
    rounding: RoundingMode,
) -> Result<Vec<NgoPayout>, ValidationError> {
    validate_shares(shares)?;
    if total_funds < Decimal::ZERO || total_funds.round_dp(2) != total_funds {
        return Err(ValidationError::InvalidTotal(total_funds));
    }

    let overflow = || ValidationError::AmountOverflow("NGO allocation");

    // The fraction is at most 1, so each raw share stays within the total
    let mut payouts = shares
        .iter()
        .map(|share| -> Result<NgoPayout, ValidationError> {
            let raw = (share.pct / Decimal::ONE_HUNDRED)
                .checked_mul(total_funds)
                .ok_or_else(overflow)?;
            Ok(NgoPayout {
                ngo_id: share.ngo_id,
                amount: rounding.round_cents(raw),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let allocated = payouts
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.amount))
        .ok_or_else(overflow)?;
    let residual = total_funds - allocated;
    if !residual.is_zero() {
        absorb_residual(&mut payouts, shares, residual);
    }

    Ok(payouts)
}

/// Recipient indexes by share descending, ties by NGO id ascending.
fn by_share_desc(shares: &[NgoAllocation]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..shares.len()).collect();
    order.sort_by(|&a, &b| {
        shares[b]
            .pct
            .cmp(&shares[a].pct)
            .then(shares[a].ngo_id.cmp(&shares[b].ngo_id))
    });
    order
}

fn absorb_residual(payouts: &mut [NgoPayout], shares: &[NgoAllocation], residual: Decimal) {
    let order = by_share_desc(shares);

    if residual > Decimal::ZERO {
        payouts[order[0]].amount += residual;
        return;
    }

    // Over-allocation: take it back from the largest shares, never below zero
    let mut excess = -residual;
    for idx in order {
        let take = excess.min(payouts[idx].amount);
        payouts[idx].amount -= take;
        excess -= take;
        if excess.is_zero() {
            break;
        }
    }
}
