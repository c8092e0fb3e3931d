// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the engine.

pub mod activity;
pub mod binding;
pub mod campaign;
pub mod rule;
pub mod snapshot;
pub mod stats;

pub use activity::{Activity, Classification, RejectionReason};
pub use binding::{NgoAllocation, SponsorBinding};
pub use campaign::{Campaign, CampaignStatus};
pub use rule::{current_rule, CampaignRule, ExclusionFilter, RoundingMode};
pub use snapshot::{CampaignInput, EngineInput};
pub use stats::{
    ActivityOutcome, AthleteCampaignStat, AthleteTotals, CampaignReport, CampaignSummary,
    DailyPoint, EngineReport, GlobalReport, NgoPayout, SponsorContribution,
};
