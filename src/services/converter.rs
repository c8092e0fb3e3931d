// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Distance to money conversion.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{CampaignRule, RoundingMode};

const METERS_PER_KM: Decimal = Decimal::ONE_THOUSAND;

/// Convert validated distance into a monetary amount under a rule.
///
/// The rule's rate wins; `base_rate` (the campaign's) applies when unset.
pub fn convert(
    distance_m: f64,
    rule: &CampaignRule,
    base_rate: Decimal,
) -> Result<Decimal, ValidationError> {
    convert_at_rate(distance_m, rule.effective_rate(base_rate), rule.rounding)
}

/// Convert at an explicit rate: `distance_m / 1000 * rate`, rounded to cents.
pub fn convert_at_rate(
    distance_m: f64,
    rate: Decimal,
    rounding: RoundingMode,
) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidDistance {
        activity_id: 0,
        distance_m,
    };
    if !distance_m.is_finite() || distance_m < 0.0 {
        return Err(invalid());
    }
    if rate < Decimal::ZERO {
        return Err(ValidationError::NegativeRate(rate));
    }

    let overflow = || ValidationError::AmountOverflow("distance conversion");
    // Finite distances beyond Decimal::MAX meters do not convert
    let meters = Decimal::from_f64(distance_m).ok_or_else(overflow)?;
    let raw = meters
        .checked_div(METERS_PER_KM)
        .and_then(|km| km.checked_mul(rate))
        .ok_or_else(overflow)?;
    Ok(rounding.round_cents(raw))
}
