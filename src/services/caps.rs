// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cap enforcement on accumulated monetary totals.
//!
//! Clamping is order-dependent: callers must feed amounts in processing
//! order (start time, then activity id). Excess above a cap is dropped and
//! never carried forward.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationError;
use crate::models::{SponsorBinding, SponsorContribution};

/// Result of clamping one amount against a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapOutcome {
    /// Amount that fits under the cap
    pub amount: Decimal,
    /// Room left after this amount (unset: no cap)
    pub headroom: Option<Decimal>,
}

impl CapOutcome {
    /// Whether part of the requested amount was dropped.
    pub fn clamped(&self, requested: Decimal) -> bool {
        self.amount < requested
    }
}

/// Clamp `new_amount` so that `running_total + amount` stays within `cap`.
pub fn apply_cap(
    running_total: Decimal,
    new_amount: Decimal,
    cap: Option<Decimal>,
) -> Result<CapOutcome, ValidationError> {
    if new_amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(new_amount));
    }
    if running_total < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(running_total));
    }

    let Some(cap) = cap else {
        return Ok(CapOutcome {
            amount: new_amount,
            headroom: None,
        });
    };
    if cap < Decimal::ZERO {
        return Err(ValidationError::NegativeCap(cap));
    }

    let room = (cap - running_total).max(Decimal::ZERO);
    let amount = new_amount.min(room);
    Ok(CapOutcome {
        amount,
        headroom: Some(room - amount),
    })
}

/// Clamp against a per-athlete cap.
pub fn apply_athlete_cap(
    running_total: Decimal,
    new_amount: Decimal,
    cap: Option<Decimal>,
) -> Result<CapOutcome, ValidationError> {
    apply_cap(running_total, new_amount, cap)
}

/// Clamp against the campaign's aggregate sponsor pool cap.
pub fn apply_sponsor_cap(
    running_total: Decimal,
    new_amount: Decimal,
    pool_cap: Option<Decimal>,
) -> Result<CapOutcome, ValidationError> {
    apply_cap(running_total, new_amount, pool_cap)
}

/// A sponsor's effective cap: the tighter of its binding cap and the rule's
/// per-sponsor cap. Unset on both sides means unbounded.
pub fn effective_sponsor_cap(
    binding: &SponsorBinding,
    rule_max_per_sponsor: Option<Decimal>,
) -> Option<Decimal> {
    match (binding.cap, rule_max_per_sponsor) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

/// Aggregate pool cap: sum of effective caps. Any unbounded sponsor makes the
/// pool unbounded, and no sponsors means no pool constraint.
pub fn sponsor_pool_cap(
    sponsors: &[SponsorBinding],
    rule_max_per_sponsor: Option<Decimal>,
) -> Result<Option<Decimal>, ValidationError> {
    if let Some(cap) = sponsors.iter().filter_map(|s| s.cap).find(|c| *c < Decimal::ZERO) {
        return Err(ValidationError::NegativeCap(cap));
    }
    if sponsors.is_empty() {
        return Ok(None);
    }

    let mut total = Decimal::ZERO;
    for binding in sponsors {
        let Some(cap) = effective_sponsor_cap(binding, rule_max_per_sponsor) else {
            return Ok(None);
        };
        total = total
            .checked_add(cap)
            .ok_or(ValidationError::AmountOverflow("sponsor pool cap"))?;
    }
    Ok(Some(total))
}

/// Sponsors in display order: `display_order` ascending (unset last), then id.
pub fn roster_order(sponsors: &[SponsorBinding]) -> Vec<&SponsorBinding> {
    let mut roster: Vec<&SponsorBinding> = sponsors.iter().collect();
    roster.sort_by_key(|s| (s.display_order.is_none(), s.display_order, s.sponsor_id));
    roster
}

/// Attribute realized funds to sponsors, filling each up to its effective cap
/// in roster order.
pub fn attribute_to_sponsors(
    realized: Decimal,
    sponsors: &[SponsorBinding],
    rule_max_per_sponsor: Option<Decimal>,
) -> Result<Vec<SponsorContribution>, ValidationError> {
    let mut remaining = realized;
    let mut contributions = Vec::with_capacity(sponsors.len());

    for binding in roster_order(sponsors) {
        let cap = effective_sponsor_cap(binding, rule_max_per_sponsor);
        let outcome = apply_cap(Decimal::ZERO, remaining, cap)?;
        remaining -= outcome.amount;
        contributions.push(SponsorContribution {
            sponsor_id: binding.sponsor_id,
            tier: binding.tier.clone(),
            amount: outcome.amount,
            cap,
            headroom: outcome.headroom,
        });
    }

    // Unreachable from campaign evaluation, where the pool cap is the sum of
    // these same effective caps.
    if !contributions.is_empty() && remaining > Decimal::ZERO {
        tracing::warn!(
            unattributed = %remaining,
            "Realized funds exceed combined sponsor caps"
        );
    }
    Ok(contributions)
}
