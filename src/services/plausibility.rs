// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plausibility checks on raw activities.
//!
//! Checks run in a fixed order (duration, speed, pace, exclusion, zero
//! guard) and the first match is reported, so diagnostics are stable.

use crate::error::ValidationError;
use crate::models::{Activity, CampaignRule, Classification, ExclusionFilter, RejectionReason};

/// Thresholds and exclusion filter compiled from a rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlausibilityPolicy {
    pub min_duration_s: Option<f64>,
    pub max_avg_speed_kmh: Option<f64>,
    pub min_pace_s_per_km: Option<f64>,
    pub exclusions: ExclusionFilter,
}

impl PlausibilityPolicy {
    /// Compile a rule, parsing its exclusion predicate.
    pub fn from_rule(rule: &CampaignRule) -> Result<Self, ValidationError> {
        Ok(Self {
            min_duration_s: rule.min_duration_s,
            max_avg_speed_kmh: rule.max_avg_speed_kmh,
            min_pace_s_per_km: rule.min_pace_s_per_km,
            exclusions: ExclusionFilter::parse(rule.exclusions.as_ref())?,
        })
    }
}

/// Classify an activity. Pure function of its inputs.
pub fn classify(activity: &Activity, policy: &PlausibilityPolicy) -> Classification {
    match first_rejection(activity, policy) {
        Some(reason) => Classification::Rejected { reason },
        None => Classification::Valid,
    }
}

fn first_rejection(activity: &Activity, policy: &PlausibilityPolicy) -> Option<RejectionReason> {
    if let Some(min) = policy.min_duration_s {
        if activity.duration_s < min {
            return Some(RejectionReason::TooShort {
                duration_s: activity.duration_s,
                min_duration_s: min,
            });
        }
    }

    if let (Some(max), Some(speed)) = (policy.max_avg_speed_kmh, activity.avg_speed_kmh()) {
        if speed > max {
            return Some(RejectionReason::TooFast {
                speed_kmh: speed,
                max_avg_speed_kmh: max,
            });
        }
    }

    // A pace faster than the floor is implausible
    if let (Some(min), Some(pace)) = (policy.min_pace_s_per_km, activity.pace_s_per_km()) {
        if pace < min {
            return Some(RejectionReason::PaceTooFast {
                pace_s_per_km: pace,
                min_pace_s_per_km: min,
            });
        }
    }

    if let Some(reason) = excluded(activity, &policy.exclusions) {
        return Some(reason);
    }

    if activity.distance_m == 0.0 || activity.duration_s == 0.0 {
        return Some(RejectionReason::ZeroDistanceOrDuration);
    }

    None
}

fn excluded(activity: &Activity, filter: &ExclusionFilter) -> Option<RejectionReason> {
    if filter.excluded_sources.contains(&activity.source) {
        return Some(RejectionReason::ExcludedSource {
            source: activity.source.clone(),
        });
    }
    if filter.excluded_athletes.contains(&activity.athlete_id) {
        return Some(RejectionReason::ExcludedAthlete {
            athlete_id: activity.athlete_id.clone(),
        });
    }
    match filter.min_distance_m {
        Some(floor) if activity.distance_m < floor => Some(RejectionReason::BelowMinDistance {
            distance_m: activity.distance_m,
            min_distance_m: floor,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(distance_m: f64, duration_s: f64) -> Activity {
        Activity {
            id: 1,
            athlete_id: "ana".to_string(),
            campaign_id: 1,
            started_at: "2025-01-01T07:00:00Z".parse().unwrap(),
            distance_m,
            duration_s,
            source: "strava".to_string(),
        }
    }

    fn strict() -> PlausibilityPolicy {
        PlausibilityPolicy {
            min_duration_s: Some(300.0),
            max_avg_speed_kmh: Some(25.0),
            min_pace_s_per_km: Some(150.0),
            exclusions: ExclusionFilter::default(),
        }
    }

    fn reason(c: Classification) -> RejectionReason {
        match c {
            Classification::Rejected { reason } => reason,
            Classification::Valid => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_plausible_run_is_valid() {
        // 10 km in 50 min: 12 km/h, 300 s/km
        assert!(classify(&activity(10_000.0, 3000.0), &strict()).is_valid());
    }

    #[test]
    fn test_no_thresholds_accepts_anything_nonzero() {
        let policy = PlausibilityPolicy::default();
        assert!(classify(&activity(100_000.0, 1.0), &policy).is_valid());
    }

    #[test]
    fn test_too_short() {
        let r = reason(classify(&activity(1000.0, 200.0), &strict()));
        assert!(matches!(r, RejectionReason::TooShort { .. }));
    }

    #[test]
    fn test_too_fast() {
        // 30 km in 1 h
        let r = reason(classify(&activity(30_000.0, 3600.0), &strict()));
        assert_eq!(
            r,
            RejectionReason::TooFast {
                speed_kmh: 30.0,
                max_avg_speed_kmh: 25.0
            }
        );
    }

    #[test]
    fn test_pace_floor() {
        let policy = PlausibilityPolicy {
            min_pace_s_per_km: Some(180.0),
            ..Default::default()
        };
        // 5 km in 10 min: 120 s/km
        let r = reason(classify(&activity(5000.0, 600.0), &policy));
        assert!(matches!(r, RejectionReason::PaceTooFast { .. }));
    }

    #[test]
    fn test_first_matching_reason_wins() {
        // Too short and too fast: duration is checked first
        let r = reason(classify(&activity(5000.0, 60.0), &strict()));
        assert!(matches!(r, RejectionReason::TooShort { .. }));
    }

    #[test]
    fn test_exclusions() {
        let mut policy = PlausibilityPolicy::default();
        policy.exclusions.excluded_sources.insert("manual".to_string());
        policy.exclusions.min_distance_m = Some(1000.0);

        let mut manual = activity(5000.0, 1800.0);
        manual.source = "manual".to_string();
        assert!(matches!(
            reason(classify(&manual, &policy)),
            RejectionReason::ExcludedSource { .. }
        ));

        assert!(matches!(
            reason(classify(&activity(500.0, 300.0), &policy)),
            RejectionReason::BelowMinDistance { .. }
        ));

        policy.exclusions.excluded_athletes.insert("ana".to_string());
        assert!(matches!(
            reason(classify(&activity(5000.0, 1800.0), &policy)),
            RejectionReason::ExcludedAthlete { .. }
        ));
    }

    #[test]
    fn test_zero_duration_always_rejected() {
        for distance in [0.0, 1.0, 10_000.0, 1e9] {
            let c = classify(&activity(distance, 0.0), &PlausibilityPolicy::default());
            assert!(!c.is_valid(), "distance {distance} with zero duration");
        }
        let c = classify(&activity(0.0, 600.0), &PlausibilityPolicy::default());
        assert_eq!(
            reason(c),
            RejectionReason::ZeroDistanceOrDuration
        );
    }

    #[test]
    fn test_policy_from_rule_rejects_bad_exclusions() {
        let rule = CampaignRule {
            campaign_id: 1,
            version: 1,
            effective_from: None,
            rate: None,
            max_per_athlete: None,
            max_per_sponsor: None,
            rounding: Default::default(),
            min_duration_s: None,
            max_avg_speed_kmh: None,
            min_pace_s_per_km: None,
            exclusions: Some(serde_json::json!([1, 2, 3])),
        };
        assert!(matches!(
            PlausibilityPolicy::from_rule(&rule),
            Err(ValidationError::InvalidExclusions(_))
        ));
    }
}
