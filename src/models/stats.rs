//! Derived statistics and report records.
//!
//! Everything here is recomputed deterministically from activities and the
//! current rule; nothing is hand-edited. Collections are ordered (`Vec`,
//! `BTreeMap`) so serialized reports are byte-stable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{CampaignStatus, Classification};

/// Per-athlete totals within one campaign, after cap enforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AthleteCampaignStat {
    pub athlete_id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub campaign_id: u64,
    /// Validated distance (meters)
    pub total_distance_m: f64,
    /// Realized value after caps
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub total_value: Decimal,
}

/// Per-athlete totals for leaderboards (single campaign or across campaigns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AthleteTotals {
    pub athlete_id: String,
    pub total_distance_m: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub total_value: Decimal,
}

/// Headline numbers for a scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CampaignSummary {
    pub total_distance_m: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub total_value: Decimal,
    pub athlete_count: u32,
    pub avg_km_per_athlete: f64,
}

/// Kilometers covered on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyPoint {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub day: NaiveDate,
    pub km: f64,
}

/// Amount owed to one NGO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NgoPayout {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub ngo_id: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub amount: Decimal,
}

/// Realized contribution attributed to one sponsor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsorContribution {
    pub sponsor_id: u64,
    pub tier: Option<String>,
    pub amount: Decimal,
    /// Effective cap (unset: unbounded)
    pub cap: Option<Decimal>,
    /// Cap minus amount (unset: unbounded)
    pub headroom: Option<Decimal>,
}

/// Audit record for one activity, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOutcome {
    pub activity_id: u64,
    pub athlete_id: String,
    /// UTC start day
    pub day: NaiveDate,
    pub distance_m: f64,
    pub classification: Classification,
    /// Converted amount before caps
    pub gross: Decimal,
    /// Amount after the athlete cap
    pub after_athlete_cap: Decimal,
    /// Amount after the sponsor pool cap (what the campaign realizes)
    pub realized: Decimal,
}

/// Full evaluation result for one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignReport {
    pub campaign_id: u64,
    pub status: CampaignStatus,
    /// Version of the rule that governed this evaluation
    pub rule_version: u32,
    pub summary: CampaignSummary,
    pub daily: Vec<DailyPoint>,
    pub top_athletes: Vec<AthleteTotals>,
    pub athletes: Vec<AthleteCampaignStat>,
    pub sponsors: Vec<SponsorContribution>,
    pub payouts: Vec<NgoPayout>,
    /// Percentage of the goal reached, when a positive goal is set
    pub goal_progress_pct: Option<Decimal>,
    pub activities: Vec<ActivityOutcome>,
}

/// Cross-campaign rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalReport {
    pub summary: CampaignSummary,
    pub daily: Vec<DailyPoint>,
    pub top_athletes: Vec<AthleteTotals>,
}

/// Everything one engine run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    pub campaigns: Vec<CampaignReport>,
    pub global: GlobalReport,
    /// Hex SHA-256 of the canonical JSON of `campaigns` and `global`
    pub digest: String,
}
