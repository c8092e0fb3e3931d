// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use pacefund::models::{
    Activity, Campaign, CampaignInput, CampaignRule, CampaignStatus, EngineInput, NgoAllocation,
    RoundingMode, SponsorBinding,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const CAMPAIGN_ID: u64 = 1;

/// An active January 2025 campaign at 0.50 per km.
#[allow(dead_code)]
pub fn campaign() -> Campaign {
    Campaign {
        id: CAMPAIGN_ID,
        name: "Corrida Solidária".to_string(),
        period_start: "2025-01-01".parse().unwrap(),
        period_finish: "2025-01-31".parse().unwrap(),
        status: CampaignStatus::Active,
        goal: Some(dec!(200)),
        base_rate: dec!(0.50),
        visual_identity: None,
    }
}

/// A permissive rule: no thresholds, no caps, nearest rounding.
#[allow(dead_code)]
pub fn rule() -> CampaignRule {
    CampaignRule {
        campaign_id: CAMPAIGN_ID,
        version: 1,
        effective_from: None,
        rate: None,
        max_per_athlete: None,
        max_per_sponsor: None,
        rounding: RoundingMode::Nearest,
        min_duration_s: None,
        max_avg_speed_kmh: None,
        min_pace_s_per_km: None,
        exclusions: None,
    }
}

/// A plausible activity: `distance_m` at 10 km/h.
#[allow(dead_code)]
pub fn activity(id: u64, athlete: &str, started_at: &str, distance_m: f64) -> Activity {
    Activity {
        id,
        athlete_id: athlete.to_string(),
        campaign_id: CAMPAIGN_ID,
        started_at: started_at.parse().unwrap(),
        distance_m,
        duration_s: distance_m * 0.36,
        source: "strava".to_string(),
    }
}

#[allow(dead_code)]
pub fn sponsor(sponsor_id: u64, cap: Option<Decimal>, display_order: Option<u32>) -> SponsorBinding {
    SponsorBinding {
        campaign_id: CAMPAIGN_ID,
        sponsor_id,
        tier: Some("gold".to_string()),
        cap,
        display_order,
    }
}

#[allow(dead_code)]
pub fn ngo(ngo_id: u64, pct: Decimal) -> NgoAllocation {
    NgoAllocation {
        campaign_id: CAMPAIGN_ID,
        ngo_id,
        pct,
    }
}

/// Single-campaign input with a 60/30/10 NGO split and no sponsors.
#[allow(dead_code)]
pub fn campaign_input(activities: Vec<Activity>) -> CampaignInput {
    CampaignInput {
        as_of: None,
        campaign: campaign(),
        rules: vec![rule()],
        activities,
        sponsors: vec![],
        ngos: vec![ngo(10, dec!(60)), ngo(20, dec!(30)), ngo(30, dec!(10))],
    }
}

/// Load the shared snapshot fixture.
#[allow(dead_code)]
pub fn load_snapshot() -> EngineInput {
    let raw = std::fs::read_to_string("tests/fixtures/snapshot.json")
        .expect("Failed to read snapshot fixture");
    serde_json::from_str(&raw).expect("Failed to parse snapshot fixture")
}
