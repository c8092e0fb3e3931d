// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Versioned campaign rules.
//!
//! A rule row is never edited in place: a new version supersedes the
//! previous one, so historical evaluations stay reproducible by picking the
//! version that was current at the time.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use crate::error::ValidationError;

/// How monetary amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half up (midpoint away from zero)
    #[default]
    Nearest,
    /// Round toward negative infinity
    Floor,
    /// Round toward positive infinity
    Ceil,
}

impl RoundingMode {
    /// Round to 2 decimal places.
    pub fn round_cents(self, value: Decimal) -> Decimal {
        let strategy = match self {
            RoundingMode::Nearest => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::Ceil => RoundingStrategy::ToPositiveInfinity,
        };
        value.round_dp_with_strategy(2, strategy)
    }
}

/// One version of a campaign's conversion, cap and plausibility parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CampaignRule {
    pub campaign_id: u64,
    /// Monotonically increasing version number
    #[serde(default = "default_version")]
    pub version: u32,
    /// When this version takes effect (unset: always)
    #[serde(default)]
    pub effective_from: Option<DateTime<Utc>>,
    /// Currency per km; falls back to the campaign base rate when unset
    #[serde(default)]
    #[validate(custom(function = "non_negative_decimal"))]
    pub rate: Option<Decimal>,
    #[serde(default)]
    #[validate(custom(function = "non_negative_decimal"))]
    pub max_per_athlete: Option<Decimal>,
    #[serde(default)]
    #[validate(custom(function = "non_negative_decimal"))]
    pub max_per_sponsor: Option<Decimal>,
    #[serde(default)]
    pub rounding: RoundingMode,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub min_duration_s: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub max_avg_speed_kmh: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub min_pace_s_per_km: Option<f64>,
    /// Raw exclusion predicate; parsed by [`ExclusionFilter::parse`]
    #[serde(default)]
    pub exclusions: Option<serde_json::Value>,
}

fn default_version() -> u32 {
    1
}

fn non_negative_decimal(value: &Decimal) -> Result<(), validator::ValidationError> {
    if *value < Decimal::ZERO {
        return Err(validator::ValidationError::new("negative"));
    }
    Ok(())
}

impl CampaignRule {
    /// Check rate, cap and threshold ranges.
    pub fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(|e| ValidationError::InvalidRule {
            campaign_id: self.campaign_id,
            version: self.version,
            details: e.to_string(),
        })?;

        let thresholds = [
            ("min_duration_s", self.min_duration_s),
            ("max_avg_speed_kmh", self.max_avg_speed_kmh),
            ("min_pace_s_per_km", self.min_pace_s_per_km),
        ];
        for (name, value) in thresholds {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(ValidationError::InvalidRule {
                    campaign_id: self.campaign_id,
                    version: self.version,
                    details: format!("{name} must be finite"),
                });
            }
        }
        Ok(())
    }

    /// Rate applied to validated distance.
    pub fn effective_rate(&self, base_rate: Decimal) -> Decimal {
        self.rate.unwrap_or(base_rate)
    }
}

/// Pick the rule version current at `as_of` (or the latest when unset).
///
/// Only rules belonging to `campaign_id` are considered.
pub fn current_rule<'a>(
    campaign_id: u64,
    rules: impl IntoIterator<Item = &'a CampaignRule>,
    as_of: Option<DateTime<Utc>>,
) -> Result<&'a CampaignRule, ValidationError> {
    let mut seen = BTreeSet::new();
    let mut current: Option<&CampaignRule> = None;

    for rule in rules.into_iter().filter(|r| r.campaign_id == campaign_id) {
        if !seen.insert(rule.version) {
            return Err(ValidationError::DuplicateRuleVersion {
                campaign_id,
                version: rule.version,
            });
        }
        let in_effect = match (as_of, rule.effective_from) {
            (Some(at), Some(from)) => from <= at,
            _ => true,
        };
        if in_effect && current.map_or(true, |c| rule.version > c.version) {
            current = Some(rule);
        }
    }

    current.ok_or(ValidationError::NoCurrentRule { campaign_id })
}

/// Structured exclusion predicate over activity attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExclusionFilter {
    /// Data sources whose activities never count
    #[serde(default)]
    pub excluded_sources: BTreeSet<String>,
    /// Athletes excluded from this campaign
    #[serde(default)]
    pub excluded_athletes: BTreeSet<String>,
    /// Activities shorter than this never count
    #[serde(default)]
    pub min_distance_m: Option<f64>,
}

impl ExclusionFilter {
    /// Parse a stored predicate. `null` and `{}` mean "exclude nothing".
    pub fn parse(raw: Option<&serde_json::Value>) -> Result<Self, ValidationError> {
        let filter = match raw {
            None | Some(serde_json::Value::Null) => Self::default(),
            Some(value) => Self::deserialize(value)
                .map_err(|e| ValidationError::InvalidExclusions(e.to_string()))?,
        };

        if let Some(floor) = filter.min_distance_m {
            if !floor.is_finite() || floor < 0.0 {
                return Err(ValidationError::InvalidExclusions(format!(
                    "min_distance_m must be a non-negative number, got {floor}"
                )));
            }
        }
        Ok(filter)
    }
}
