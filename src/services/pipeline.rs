// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end campaign evaluation.
//!
//! Handles the core workflow:
//! 1. Validate campaign, current rule, bindings and activities
//! 2. Order activities by start time (ties by activity id)
//! 3. Classify each activity against the period and plausibility rules
//! 4. Convert validated distance and clamp against athlete and sponsor caps
//! 5. Project stats, attribute funds to sponsors and split them across NGOs

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use crate::error::ValidationError;
use crate::models::{
    current_rule, Activity, ActivityOutcome, AthleteCampaignStat, CampaignInput, CampaignReport,
    Classification, RejectionReason, RoundingMode,
};
use crate::services::aggregator::{project, ValidatedEntry};
use crate::services::allocation::{allocate, validate_shares};
use crate::services::caps::{
    apply_athlete_cap, apply_sponsor_cap, attribute_to_sponsors, sponsor_pool_cap,
};
use crate::services::converter::convert;
use crate::services::plausibility::{classify, PlausibilityPolicy};
use crate::time_utils::format_utc_rfc3339;

/// Activities in processing order: `started_at` ascending, then id.
pub fn processing_order(activities: &[Activity]) -> Vec<&Activity> {
    let mut ordered: Vec<&Activity> = activities.iter().collect();
    ordered.sort_by(|a, b| {
        a.started_at
            .cmp(&b.started_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    ordered
}

/// Evaluate one campaign. Pure: identical inputs give identical reports.
pub fn evaluate_campaign(
    input: &CampaignInput,
    top_n: usize,
) -> Result<CampaignReport, ValidationError> {
    let campaign = &input.campaign;
    campaign.validate()?;

    let rule = current_rule(campaign.id, &input.rules, input.as_of)?;
    rule.check()?;
    let policy = PlausibilityPolicy::from_rule(rule)?;
    let pool_cap = sponsor_pool_cap(&input.sponsors, rule.max_per_sponsor)?;
    if !input.ngos.is_empty() {
        validate_shares(&input.ngos)?;
    }
    for activity in &input.activities {
        activity.check()?;
    }

    let mut seen = HashSet::new();
    let mut athlete_running: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut pool_running = Decimal::ZERO;
    let mut entries = Vec::new();
    let mut outcomes = Vec::with_capacity(input.activities.len());

    for activity in processing_order(&input.activities) {
        if !seen.insert(activity.id) {
            tracing::debug!(
                campaign_id = campaign.id,
                activity_id = activity.id,
                "Activity already processed (idempotent skip)"
            );
            continue;
        }

        let classification = if campaign.covers(activity.day()) {
            classify(activity, &policy)
        } else {
            Classification::Rejected {
                reason: RejectionReason::OutsideCampaignPeriod {
                    day: activity.day(),
                },
            }
        };

        if let Classification::Rejected { reason } = &classification {
            tracing::debug!(
                campaign_id = campaign.id,
                activity_id = activity.id,
                started_at = %format_utc_rfc3339(activity.started_at),
                reason = ?reason,
                "Activity rejected"
            );
            outcomes.push(ActivityOutcome {
                activity_id: activity.id,
                athlete_id: activity.athlete_id.clone(),
                day: activity.day(),
                distance_m: activity.distance_m,
                classification,
                gross: Decimal::ZERO,
                after_athlete_cap: Decimal::ZERO,
                realized: Decimal::ZERO,
            });
            continue;
        }

        let gross = convert(activity.distance_m, rule, campaign.base_rate).map_err(|e| match e {
            ValidationError::InvalidDistance { distance_m, .. } => {
                ValidationError::InvalidDistance {
                    activity_id: activity.id,
                    distance_m,
                }
            }
            other => other,
        })?;

        let running = athlete_running
            .entry(activity.athlete_id.as_str())
            .or_insert(Decimal::ZERO);
        let athlete = apply_athlete_cap(*running, gross, rule.max_per_athlete)?;
        let pool = apply_sponsor_cap(pool_running, athlete.amount, pool_cap)?;

        if pool.amount < gross {
            tracing::debug!(
                campaign_id = campaign.id,
                activity_id = activity.id,
                athlete_id = %activity.athlete_id,
                gross = %gross,
                realized = %pool.amount,
                "Amount clamped by cap"
            );
        }

        *running = running
            .checked_add(pool.amount)
            .ok_or(ValidationError::AmountOverflow("athlete running total"))?;
        pool_running = pool_running
            .checked_add(pool.amount)
            .ok_or(ValidationError::AmountOverflow("sponsor pool running total"))?;

        entries.push(ValidatedEntry {
            athlete_id: activity.athlete_id.clone(),
            day: activity.day(),
            distance_m: activity.distance_m,
            value: pool.amount,
        });
        outcomes.push(ActivityOutcome {
            activity_id: activity.id,
            athlete_id: activity.athlete_id.clone(),
            day: activity.day(),
            distance_m: activity.distance_m,
            classification,
            gross,
            after_athlete_cap: athlete.amount,
            realized: pool.amount,
        });
    }

    let projection = project(&entries, top_n)?;
    let total_value = projection.summary.total_value;

    let sponsors = attribute_to_sponsors(total_value, &input.sponsors, rule.max_per_sponsor)?;
    let payouts = if input.ngos.is_empty() {
        tracing::warn!(
            campaign_id = campaign.id,
            "Campaign has no NGO allocations; funds left unallocated"
        );
        Vec::new()
    } else {
        allocate(total_value, &input.ngos, rule.rounding)?
    };

    let goal_progress_pct = campaign
        .goal
        .filter(|goal| *goal > Decimal::ZERO)
        .map(|goal| {
            total_value
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(goal))
                .map(|pct| RoundingMode::Nearest.round_cents(pct))
                .ok_or(ValidationError::AmountOverflow("goal progress"))
        })
        .transpose()?;

    let athletes = projection
        .athletes
        .iter()
        .map(|a| AthleteCampaignStat {
            athlete_id: a.athlete_id.clone(),
            campaign_id: campaign.id,
            total_distance_m: a.total_distance_m,
            total_value: a.total_value,
        })
        .collect();

    tracing::info!(
        campaign_id = campaign.id,
        rule_version = rule.version,
        activities = outcomes.len(),
        validated = entries.len(),
        total_value = %total_value,
        "Campaign evaluated"
    );

    Ok(CampaignReport {
        campaign_id: campaign.id,
        status: campaign.status,
        rule_version: rule.version,
        summary: projection.summary,
        daily: projection.daily,
        top_athletes: projection.top_athletes,
        athletes,
        sponsors,
        payouts,
        goal_progress_pct,
        activities: outcomes,
    })
}

/// Validated entries of a report, in processing order.
///
/// Used to roll several campaigns up into the global scope.
pub fn validated_entries(report: &CampaignReport) -> impl Iterator<Item = ValidatedEntry> + '_ {
    report
        .activities
        .iter()
        .filter(|o| o.classification.is_valid())
        .map(|o| ValidatedEntry {
            athlete_id: o.athlete_id.clone(),
            day: o.day,
            distance_m: o.distance_m,
            value: o.realized,
        })
}
